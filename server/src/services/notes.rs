//! Note service — the adapter between websocket requests and the note store.
//!
//! DESIGN
//! ======
//! Every operation is a thin write-through: validate, build the record, hand
//! it to the store. Nothing is cached here. Readers observe writes only
//! through live queries, which re-run the day-scoped query each time the
//! store's change feed fires and deliver the full result, never a diff.
//!
//! LIFECYCLE
//! =========
//! 1. `subscribe` opens the change feed, then the first `next_snapshot`
//!    returns the current result without waiting.
//! 2. Each later `next_snapshot` waits for a change, drains the burst, and
//!    re-queries.
//! 3. Dropping the `LiveQuery` drops its feed receiver; nothing else to
//!    release.

use std::sync::Arc;

use notes::{ErrorCode, NewNote, Note, NoteColor, NoteId, Position, Reaction, ReactionEmoji, Viewport};
use rand::Rng;
use tracing::{debug, info};
use uuid::Uuid;

use crate::state::AppState;
use crate::store::{ChangeFeed, NoteStore, StoreError};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("note content is empty")]
    EmptyContent,
    #[error("author is empty")]
    EmptyAuthor,
    #[error("position must be finite, got ({x}, {y})")]
    InvalidPosition { x: f64, y: f64 },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ErrorCode for NoteError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyContent => "E_EMPTY_CONTENT",
            Self::EmptyAuthor => "E_EMPTY_AUTHOR",
            Self::InvalidPosition { .. } => "E_INVALID_POSITION",
            Self::Store(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Store(e) => e.retryable(),
            _ => false,
        }
    }
}

// =============================================================================
// LIVE QUERY
// =============================================================================

/// Standing query for notes created at or after `day_start`, newest first.
pub struct LiveQuery {
    store: Arc<dyn NoteStore>,
    day_start: i64,
    feed: ChangeFeed,
    primed: bool,
}

impl LiveQuery {
    #[cfg(test)]
    pub(crate) fn for_tests(store: Arc<dyn NoteStore>, day_start: i64, feed: ChangeFeed) -> Self {
        Self { store, day_start, feed, primed: false }
    }

    /// Full current result. Immediate on the first call; afterwards waits for
    /// the next change in the collection.
    ///
    /// # Errors
    ///
    /// Returns `Store(FeedClosed)` if the store goes away, or the store's
    /// query error.
    pub async fn next_snapshot(&mut self) -> Result<Vec<Note>, NoteError> {
        if self.primed {
            self.feed.changed().await?;
            self.feed.drain()?;
        }
        self.primed = true;
        let notes = self.store.query_since(self.day_start).await?;
        debug!(day_start = self.day_start, count = notes.len(), "live query snapshot");
        Ok(notes)
    }
}

/// Open a live query scoped to notes created at or after `day_start`.
#[must_use]
pub fn subscribe(state: &AppState, day_start: i64) -> LiveQuery {
    // Feed first so a write racing the initial query still triggers a refresh.
    let feed = state.store.changes();
    LiveQuery { store: Arc::clone(&state.store), day_start, feed, primed: false }
}

// =============================================================================
// WRITES
// =============================================================================

/// Create a note at a random position inside `viewport`.
///
/// Content is stored exactly as given; only the emptiness check trims.
///
/// # Errors
///
/// Returns `EmptyContent`/`EmptyAuthor` for blank input, or the store error.
pub async fn create_note(
    state: &AppState,
    content: &str,
    color: NoteColor,
    author: &str,
    viewport: Viewport,
) -> Result<Note, NoteError> {
    if content.trim().is_empty() {
        return Err(NoteError::EmptyContent);
    }
    if author.trim().is_empty() {
        return Err(NoteError::EmptyAuthor);
    }

    let position = random_position(viewport);
    let draft = NewNote {
        content: content.to_owned(),
        author: author.to_owned(),
        color,
        position,
        timestamp: notes::now_ms(),
    };

    let note = state.store.insert(draft).await?;
    info!(note_id = %note.id, %author, color = color.name(), "note created");
    Ok(note)
}

fn random_position(viewport: Viewport) -> Position {
    let mut rng = rand::rng();
    viewport.place(rng.random::<f64>(), rng.random::<f64>())
}

/// Remove a note. Any client may delete any note.
///
/// # Errors
///
/// Returns `Store(NotFound)` if the id is unknown.
pub async fn delete_note(state: &AppState, id: NoteId) -> Result<(), NoteError> {
    state.store.delete(id).await?;
    info!(note_id = %id, "note deleted");
    Ok(())
}

/// Overwrite a note's position exactly; no clamping.
///
/// # Errors
///
/// Returns `InvalidPosition` for NaN or infinite coordinates, or
/// `Store(NotFound)` if the id is unknown.
pub async fn move_note(state: &AppState, id: NoteId, position: Position) -> Result<(), NoteError> {
    if !position.is_finite() {
        return Err(NoteError::InvalidPosition { x: position.x, y: position.y });
    }
    state.store.set_position(id, position).await?;
    debug!(note_id = %id, x = position.x, y = position.y, "note moved");
    Ok(())
}

/// Append a fresh reaction. Each call mints its own id and timestamp, so
/// repeated reactions with the same emoji all count.
///
/// # Errors
///
/// Returns `EmptyAuthor` for a blank author, or `Store(NotFound)`.
pub async fn add_reaction(
    state: &AppState,
    id: NoteId,
    emoji: ReactionEmoji,
    author: &str,
) -> Result<Reaction, NoteError> {
    if author.trim().is_empty() {
        return Err(NoteError::EmptyAuthor);
    }
    let reaction = Reaction { id: Uuid::new_v4(), emoji, author: author.to_owned(), timestamp: notes::now_ms() };
    state.store.union_reaction(id, reaction.clone()).await?;
    info!(note_id = %id, emoji = emoji.glyph(), %author, "reaction added");
    Ok(reaction)
}

#[cfg(test)]
#[path = "notes_test.rs"]
mod tests;
