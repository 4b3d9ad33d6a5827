//! In-memory note store for local development and tests.
//!
//! Mirrors the PostgreSQL store's semantics: generated ids, exact position
//! overwrite, append-if-absent reactions, and one change notice per
//! successful mutation.

use std::collections::HashMap;

use async_trait::async_trait;
use notes::day::in_scope;
use notes::note::newest_first;
use notes::{NewNote, Note, NoteId, Position, Reaction};
use tokio::sync::{RwLock, broadcast};
use uuid::Uuid;

use super::{ChangeFeed, ChangeNotice, NoteStore, StoreError};

pub struct MemoryStore {
    notes: RwLock<HashMap<NoteId, Note>>,
    changes: broadcast::Sender<ChangeNotice>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(feed_capacity: usize) -> Self {
        let (changes, _) = broadcast::channel(feed_capacity.max(1));
        Self { notes: RwLock::new(HashMap::new()), changes }
    }

    fn notify(&self, note_id: NoteId) {
        // No live subscribers is not an error.
        let _ = self.changes.send(ChangeNotice { note_id: Some(note_id) });
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn insert(&self, draft: NewNote) -> Result<Note, StoreError> {
        let note = draft.into_note(Uuid::new_v4());
        self.notes.write().await.insert(note.id, note.clone());
        self.notify(note.id);
        Ok(note)
    }

    async fn set_position(&self, id: NoteId, position: Position) -> Result<(), StoreError> {
        {
            let mut notes = self.notes.write().await;
            let note = notes.get_mut(&id).ok_or(StoreError::NotFound(id))?;
            note.x = position.x;
            note.y = position.y;
        }
        self.notify(id);
        Ok(())
    }

    async fn delete(&self, id: NoteId) -> Result<(), StoreError> {
        if self.notes.write().await.remove(&id).is_none() {
            return Err(StoreError::NotFound(id));
        }
        self.notify(id);
        Ok(())
    }

    async fn union_reaction(&self, id: NoteId, reaction: Reaction) -> Result<(), StoreError> {
        let changed = {
            let mut notes = self.notes.write().await;
            let note = notes.get_mut(&id).ok_or(StoreError::NotFound(id))?;
            note.union_reaction(reaction)
        };
        if changed {
            self.notify(id);
        }
        Ok(())
    }

    async fn query_since(&self, day_start: i64) -> Result<Vec<Note>, StoreError> {
        let mut notes: Vec<Note> = self
            .notes
            .read()
            .await
            .values()
            .filter(|n| in_scope(n.timestamp, day_start))
            .cloned()
            .collect();
        notes.sort_by(newest_first);
        Ok(notes)
    }

    fn changes(&self) -> ChangeFeed {
        ChangeFeed::new(self.changes.subscribe())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
