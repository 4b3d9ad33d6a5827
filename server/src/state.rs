//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! carries only the note store and per-connection tuning; live subscriptions
//! belong to the websocket connection that opened them, not to shared state.

use std::sync::Arc;

use crate::config::{DEFAULT_WS_OUTBOUND_CAPACITY, ServerConfig};
use crate::store::NoteStore;

/// Shared application state. Clone is required by Axum; inner fields are
/// Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn NoteStore>,
    /// Outbound frame buffer per websocket connection.
    pub ws_outbound_capacity: usize,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn NoteStore>, config: &ServerConfig) -> Self {
        Self { store, ws_outbound_capacity: config.ws_outbound_capacity.max(1) }
    }

    #[must_use]
    pub fn with_store(store: Arc<dyn NoteStore>) -> Self {
        Self { store, ws_outbound_capacity: DEFAULT_WS_OUTBOUND_CAPACITY }
    }
}

#[cfg(test)]
#[path = "state_helpers_test.rs"]
pub mod test_helpers;

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
