//! Client-side state models provided through Leptos context.
//!
//! DESIGN
//! ======
//! Each model is a plain struct wrapped in an `RwSignal` by `app::App`.
//! Mutation methods are pure so they can be unit tested without a browser.

pub mod board;
pub mod composer;
pub mod player;
pub mod session;
