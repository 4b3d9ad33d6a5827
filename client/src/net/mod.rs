//! Websocket plumbing between the board UI and the note relay.

pub mod dispatch;
pub mod frame_client;
pub mod requests;
