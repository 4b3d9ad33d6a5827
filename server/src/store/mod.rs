//! External note store — the collaborator that owns canonical records.
//!
//! ARCHITECTURE
//! ============
//! `NoteStore` is the seam between the note adapter and whatever keeps the
//! data. Production uses PostgreSQL, whose `LISTEN/NOTIFY` trigger feeds the
//! change feed. The in-memory store backs local development and tests and
//! fires the same feed on every successful mutation.
//!
//! DESIGN
//! ======
//! The store exposes only what a managed document collection offers:
//! insert with a generated id, field-level update, delete by id, an
//! append-if-absent array union, one filtered/ordered query, and a change
//! feed. Live queries are built on top of that in `services::notes`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use notes::{ErrorCode, NewNote, Note, NoteId, Position, Reaction};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tracing::debug;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("note not found: {0}")]
    NotFound(NoteId),
    #[error("change feed closed")]
    FeedClosed,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_NOTE_NOT_FOUND",
            Self::FeedClosed => "E_FEED_CLOSED",
            Self::Database(_) => "E_DATABASE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::FeedClosed | Self::Database(_))
    }
}

/// A notice that the notes collection changed. Carries the touched id when
/// the backend reports one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeNotice {
    pub note_id: Option<NoteId>,
}

// =============================================================================
// STORE TRAIT
// =============================================================================

#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Insert a note and return it with its generated id.
    async fn insert(&self, draft: NewNote) -> Result<Note, StoreError>;

    /// Overwrite the position fields of one note.
    async fn set_position(&self, id: NoteId, position: Position) -> Result<(), StoreError>;

    async fn delete(&self, id: NoteId) -> Result<(), StoreError>;

    /// Append `reaction` unless an identical object is already present.
    async fn union_reaction(&self, id: NoteId, reaction: Reaction) -> Result<(), StoreError>;

    /// Notes with `timestamp >= day_start`, newest first.
    async fn query_since(&self, day_start: i64) -> Result<Vec<Note>, StoreError>;

    /// Subscribe to change notices. Notices sent before this call are not seen.
    fn changes(&self) -> ChangeFeed;

    /// Short backend label for logs.
    fn backend(&self) -> &'static str;
}

// =============================================================================
// CHANGE FEED
// =============================================================================

/// Receiving half of a store's change notices.
pub struct ChangeFeed {
    rx: broadcast::Receiver<ChangeNotice>,
}

impl ChangeFeed {
    #[must_use]
    pub fn new(rx: broadcast::Receiver<ChangeNotice>) -> Self {
        Self { rx }
    }

    /// Wait for the next change. A lagged receiver counts as one change,
    /// since the caller re-reads the whole result anyway.
    ///
    /// # Errors
    ///
    /// Returns `FeedClosed` once the store side has gone away.
    pub async fn changed(&mut self) -> Result<(), StoreError> {
        match self.rx.recv().await {
            Ok(_) => Ok(()),
            Err(RecvError::Lagged(skipped)) => {
                debug!(skipped, "change feed lagged; collapsing into one refresh");
                Ok(())
            }
            Err(RecvError::Closed) => Err(StoreError::FeedClosed),
        }
    }

    /// Discard notices already queued so one burst yields one refresh.
    ///
    /// # Errors
    ///
    /// Returns `FeedClosed` once the store side has gone away.
    pub fn drain(&mut self) -> Result<(), StoreError> {
        loop {
            match self.rx.try_recv() {
                Ok(_) | Err(TryRecvError::Lagged(_)) => {}
                Err(TryRecvError::Empty) => return Ok(()),
                Err(TryRecvError::Closed) => return Err(StoreError::FeedClosed),
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
