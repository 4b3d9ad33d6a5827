//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns and pure math from
//! page and component logic to improve reuse and testability.

pub mod decoration;
pub mod drag;
pub mod storage;
pub mod time;
