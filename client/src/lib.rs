//! # client
//!
//! Leptos + WASM frontend for the shared love-notes board.
//!
//! This crate holds the pages, components and client state, plus the
//! websocket frame client that keeps the board in step with the server's
//! live query. Pure state transitions live in `state` and `net` so they are
//! testable without a browser.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
