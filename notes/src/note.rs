//! Note and reaction records as the store keeps them.
//!
//! DESIGN
//! ======
//! Positions are raw board pixels with no bounds or collision rules; a note
//! may sit at negative or off-screen coordinates. Reactions are an ordered
//! append-only list, so counts and "has reacted" are linear scans.

#[cfg(test)]
#[path = "note_test.rs"]
mod note_test;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::palette::{NoteColor, ReactionEmoji};

/// Store-assigned note identifier.
pub type NoteId = Uuid;

// =============================================================================
// GEOMETRY
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Visible board area of the client creating a note, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Horizontal room kept free so a new note does not start clipped.
    pub const RIGHT_RESERVE: f64 = 300.0;
    /// Header height; new notes start below it.
    pub const TOP_OFFSET: f64 = 100.0;
    /// Vertical room kept free for the note body and the player bar.
    pub const BOTTOM_RESERVE: f64 = 400.0;

    /// Map two unit samples in `[0, 1)` to a placement inside the viewport.
    ///
    /// x lands in `[0, width - 300)` and y in `[100, height - 300)`. Spans
    /// collapse to zero on tiny viewports so the result is never negative.
    #[must_use]
    pub fn place(self, unit_x: f64, unit_y: f64) -> Position {
        let span_x = (self.width - Self::RIGHT_RESERVE).max(0.0);
        let span_y = (self.height - Self::BOTTOM_RESERVE).max(0.0);
        Position { x: unit_x.clamp(0.0, 1.0) * span_x, y: unit_y.clamp(0.0, 1.0) * span_y + Self::TOP_OFFSET }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1280.0, height: 800.0 }
    }
}

// =============================================================================
// RECORDS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: Uuid,
    pub emoji: ReactionEmoji,
    pub author: String,
    /// Milliseconds since Unix epoch.
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    /// Display name of the local profile that wrote the note.
    pub author: String,
    pub color: NoteColor,
    pub x: f64,
    pub y: f64,
    /// Creation time, milliseconds since Unix epoch.
    pub timestamp: i64,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    #[serde(default = "default_is_today")]
    pub is_today: bool,
}

fn default_is_today() -> bool {
    true
}

/// A note before the store assigns its identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNote {
    pub content: String,
    pub author: String,
    pub color: NoteColor,
    pub position: Position,
    pub timestamp: i64,
}

impl NewNote {
    #[must_use]
    pub fn into_note(self, id: NoteId) -> Note {
        Note {
            id,
            content: self.content,
            author: self.author,
            color: self.color,
            x: self.position.x,
            y: self.position.y,
            timestamp: self.timestamp,
            reactions: Vec::new(),
            is_today: true,
        }
    }
}

/// Per-emoji summary rendered as a chip under a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionTally {
    pub emoji: ReactionEmoji,
    pub count: usize,
    pub reacted_by_viewer: bool,
}

impl Note {
    #[must_use]
    pub fn position(&self) -> Position {
        Position { x: self.x, y: self.y }
    }

    #[must_use]
    pub fn reaction_count(&self, emoji: ReactionEmoji) -> usize {
        self.reactions.iter().filter(|r| r.emoji == emoji).count()
    }

    #[must_use]
    pub fn has_reacted(&self, emoji: ReactionEmoji, author: &str) -> bool {
        self.reactions
            .iter()
            .any(|r| r.emoji == emoji && r.author == author)
    }

    /// Tallies for every emoji with at least one reaction, in picker order.
    #[must_use]
    pub fn reaction_tallies(&self, viewer: &str) -> Vec<ReactionTally> {
        ReactionEmoji::ALL
            .into_iter()
            .filter_map(|emoji| {
                let count = self.reaction_count(emoji);
                (count > 0).then(|| ReactionTally { emoji, count, reacted_by_viewer: self.has_reacted(emoji, viewer) })
            })
            .collect()
    }

    /// Append unless an identical reaction object is already present.
    /// Returns whether the list changed.
    pub fn union_reaction(&mut self, reaction: Reaction) -> bool {
        if self.reactions.contains(&reaction) {
            return false;
        }
        self.reactions.push(reaction);
        true
    }

    #[must_use]
    pub fn is_owned_by(&self, viewer: &str) -> bool {
        self.author == viewer
    }
}

/// Live-query order: newest first, ties broken by id so snapshots are stable.
#[must_use]
pub fn newest_first(a: &Note, b: &Note) -> Ordering {
    b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id))
}
