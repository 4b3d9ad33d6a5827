//! Frame — the envelope for every websocket message on the board.
//!
//! ARCHITECTURE
//! ============
//! Clients send request frames, the server dispatches by syscall prefix
//! (`notes:`, `note:`), and responses flow back as item/done/error frames
//! correlated through `parent_id`. A live subscription is one long-lived
//! request whose snapshots arrive as `item` frames until it is cancelled.
//!
//! The payload is a flat string-keyed map. Board payloads (note ids,
//! positions, day scopes, snapshots) have typed helpers here so the server
//! handlers and the client builders agree on key names.

#[cfg(test)]
#[path = "frame_test.rs"]
mod frame_test;

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::note::{Note, NoteId, Position};

/// Flat key-value payload.
pub type Data = HashMap<String, Value>;

/// Data key for the human-readable text of an error frame.
pub const FRAME_MESSAGE: &str = "message";

const FRAME_CODE: &str = "code";
const FRAME_RETRYABLE: &str = "retryable";

const KEY_ID: &str = "id";
const KEY_X: &str = "x";
const KEY_Y: &str = "y";
const KEY_DAY_START: &str = "day_start";
const KEY_NOTES: &str = "notes";

/// Where a frame sits in its exchange: `request → item* → done | error`,
/// or a `cancel` naming an earlier request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Request,
    Item,
    Done,
    Error,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub id: Uuid,
    /// Request this frame answers or cancels.
    pub parent_id: Option<Uuid>,
    /// Milliseconds since Unix epoch, stamped at construction.
    pub ts: i64,
    pub from: Option<String>,
    pub syscall: String,
    pub status: Status,
    #[serde(default)]
    pub data: Data,
}

/// Typed errors that can travel as an error frame with a stable code.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

impl Frame {
    fn new(parent_id: Option<Uuid>, syscall: String, status: Status, data: Data) -> Self {
        Self { id: Uuid::new_v4(), parent_id, ts: crate::now_ms(), from: None, syscall, status, data }
    }

    pub fn request(syscall: impl Into<String>, data: Data) -> Self {
        Self::new(None, syscall.into(), Status::Request, data)
    }

    /// Withdraw a standing request such as a live subscription.
    #[must_use]
    pub fn cancel(target_id: Uuid) -> Self {
        Self::new(Some(target_id), String::new(), Status::Cancel, Data::new())
    }

    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Namespace of the syscall: `note` for `note:move`.
    #[must_use]
    pub fn prefix(&self) -> &str {
        self.syscall.split_once(':').map_or(self.syscall.as_str(), |(prefix, _)| prefix)
    }

    /// Operation of the syscall: `move` for `note:move`.
    #[must_use]
    pub fn op(&self) -> &str {
        self.syscall.split_once(':').map_or("", |(_, op)| op)
    }
}

// =============================================================================
// BOARD PAYLOADS
// =============================================================================

impl Frame {
    #[must_use]
    pub fn with_note_id(self, id: NoteId) -> Self {
        self.with_data(KEY_ID, id.to_string())
    }

    #[must_use]
    pub fn note_id(&self) -> Option<NoteId> {
        self.data_uuid(KEY_ID)
    }

    #[must_use]
    pub fn with_position(self, position: Position) -> Self {
        self.with_data(KEY_X, position.x).with_data(KEY_Y, position.y)
    }

    /// Board coordinates carried by a move. Both axes must be present.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        Some(Position::new(self.data_f64(KEY_X)?, self.data_f64(KEY_Y)?))
    }

    #[must_use]
    pub fn with_day_start(self, day_start: i64) -> Self {
        self.with_data(KEY_DAY_START, day_start)
    }

    /// Local-midnight bound of a subscription, epoch millis.
    #[must_use]
    pub fn day_start(&self) -> Option<i64> {
        self.data_i64(KEY_DAY_START)
    }

    /// Item frame carrying one full snapshot of the subscribed day.
    #[must_use]
    pub fn snapshot(&self, notes: &[Note]) -> Self {
        let mut data = Data::new();
        data.insert(KEY_NOTES.into(), serde_json::to_value(notes).unwrap_or_default());
        self.item(data)
    }

    /// Notes of a snapshot item. `None` when the payload is missing or
    /// malformed, which is different from an empty day.
    #[must_use]
    pub fn snapshot_notes(&self) -> Option<Vec<Note>> {
        self.data_as(KEY_NOTES)
    }
}

// =============================================================================
// REPLIES
// =============================================================================

impl Frame {
    /// Reply to this request. Replies keep the request's syscall so the
    /// receiver can route them without remembering what it sent.
    fn reply(&self, status: Status, data: Data) -> Self {
        Self::new(Some(self.id), self.syscall.clone(), status, data)
    }

    #[must_use]
    pub fn item(&self, data: Data) -> Self {
        self.reply(Status::Item, data)
    }

    #[must_use]
    pub fn done(&self) -> Self {
        self.reply(Status::Done, Data::new())
    }

    /// Done carrying a result, such as the created note.
    #[must_use]
    pub fn done_with(&self, data: Data) -> Self {
        self.reply(Status::Done, data)
    }

    #[must_use]
    pub fn error(&self, message: impl Into<String>) -> Self {
        let mut data = Data::new();
        data.insert(FRAME_MESSAGE.into(), Value::String(message.into()));
        self.reply(Status::Error, data)
    }

    /// Error carrying the code and retryable flag of a typed failure.
    #[must_use]
    pub fn error_from(&self, err: &(impl ErrorCode + ?Sized)) -> Self {
        self.error(err.to_string())
            .with_data(FRAME_CODE, err.error_code())
            .with_data(FRAME_RETRYABLE, err.retryable())
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.data_str(FRAME_MESSAGE)
    }

    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.data_str(FRAME_CODE)
    }
}

// =============================================================================
// RAW PAYLOAD ACCESS
// =============================================================================

impl Frame {
    #[must_use]
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    #[must_use]
    pub fn data_f64(&self, key: &str) -> Option<f64> {
        self.data.get(key).and_then(Value::as_f64)
    }

    #[must_use]
    pub fn data_i64(&self, key: &str) -> Option<i64> {
        self.data.get(key).and_then(Value::as_i64)
    }

    #[must_use]
    pub fn data_uuid(&self, key: &str) -> Option<Uuid> {
        self.data_str(key).and_then(|s| s.parse().ok())
    }

    #[must_use]
    pub fn data_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        T::deserialize(self.data.get(key)?).ok()
    }
}
