//! Drag gesture math for sticky notes.
//!
//! DESIGN
//! ======
//! A drag applies every pointer move to a local overlay immediately, but only
//! commits to the server at most once per `COMMIT_INTERVAL_MS`. Release
//! always commits the final position unless it was already the last one sent.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use notes::Position;

/// Minimum spacing between `note:move` commits while dragging.
pub const COMMIT_INTERVAL_MS: f64 = 100.0;

/// One in-progress drag of one note.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    origin: Position,
    pointer_origin: Position,
    current: Position,
    last_commit_at: Option<f64>,
    last_committed: Position,
}

impl DragSession {
    /// Start a drag from the note's `origin` at pointer `pointer`.
    pub fn begin(origin: Position, pointer: Position) -> Self {
        Self { origin, pointer_origin: pointer, current: origin, last_commit_at: None, last_committed: origin }
    }

    pub fn current(&self) -> Position {
        self.current
    }

    /// Position of the note for a pointer at `pointer`.
    pub fn position_for(&self, pointer: Position) -> Position {
        Position::new(
            self.origin.x + (pointer.x - self.pointer_origin.x),
            self.origin.y + (pointer.y - self.pointer_origin.y),
        )
    }

    /// Track a pointer move at `now_ms`. Returns a position to commit when
    /// the throttle window has passed and the note actually moved.
    pub fn on_move(&mut self, pointer: Position, now_ms: f64) -> Option<Position> {
        self.current = self.position_for(pointer);
        if self.current == self.last_committed {
            return None;
        }
        let due = self
            .last_commit_at
            .is_none_or(|at| now_ms - at >= COMMIT_INTERVAL_MS);
        if !due {
            return None;
        }
        self.last_commit_at = Some(now_ms);
        self.last_committed = self.current;
        Some(self.current)
    }

    /// Finish the drag. Returns the final position if it differs from the
    /// last one committed.
    pub fn on_release(mut self) -> Option<Position> {
        if self.current == self.last_committed {
            return None;
        }
        self.last_committed = self.current;
        Some(self.current)
    }
}
