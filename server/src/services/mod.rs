//! Domain services used by the websocket relay.
//!
//! ARCHITECTURE
//! ============
//! `notes` is the adapter over the note store; `subscription` runs live
//! queries as relay tasks tied to a connection. Route handlers stay focused
//! on frame translation.

pub mod notes;
pub mod subscription;
