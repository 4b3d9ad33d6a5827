//! Board state: the latest snapshot plus local overlays.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server re-delivers the whole day-scoped note list on every change.
//! This model replaces its list wholesale on each delivery and layers the
//! purely local concerns on top: in-flight drags, the create-failure banner
//! and the transient toast for other write failures.
//!
//! DESIGN
//! ======
//! A drag overlay outlives pointer-up while its last `note:move` is in
//! flight, so the note does not jump back to a stale position. It ends when
//! a snapshot shows the committed position, or on the first snapshot after
//! the server acknowledged that move, whatever position it shows. The
//! server sends the `done` before any snapshot that reflects the write, so
//! a later move by the other user wins.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use std::collections::HashMap;

use notes::{Note, NoteId, Position};
use uuid::Uuid;

use crate::util::drag::DragSession;

/// Banner shown when `note:create` fails.
pub const CREATE_FAILED_MESSAGE: &str = "Unable to save note. Please check your connection.";

/// How long a toast stays up.
pub const TOAST_MS: u32 = 4_000;

/// WebSocket connection status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Not connected; socket is closed or not yet opened.
    #[default]
    Disconnected,
    /// WebSocket handshake is in progress.
    Connecting,
    /// WebSocket is open and the server sent `session:connected`.
    Connected,
}

/// Whether the board has something to show yet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    /// The live query failed; carries the server's message.
    Failed(String),
}

/// The standing `notes:subscribe` request this client wants served.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subscription {
    pub request_id: Uuid,
    pub day_start: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub seq: u64,
    pub message: String,
}

/// Local position override for one note.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragOverlay {
    pub position: Position,
    session: Option<DragSession>,
    /// Last position committed for this note.
    awaiting: Option<Position>,
    /// Request id of that commit's `note:move`.
    move_request: Option<Uuid>,
    /// The server answered `move_request` with `done`.
    acknowledged: bool,
    /// A snapshot was applied after the acknowledgement.
    synced: bool,
}

impl DragOverlay {
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    fn commit(&mut self, position: Position) {
        self.awaiting = Some(position);
        self.move_request = None;
        self.acknowledged = false;
        self.synced = false;
    }
}

#[derive(Clone, Debug, Default)]
pub struct BoardState {
    pub connection_status: ConnectionStatus,
    /// Client id assigned by `session:connected`.
    pub self_client_id: Option<String>,
    pub load: LoadState,
    /// Latest snapshot, newest first.
    pub notes: Vec<Note>,
    pub subscription: Option<Subscription>,
    pub drags: HashMap<NoteId, DragOverlay>,
    pub banner: Option<String>,
    pub toast: Option<Toast>,
    toast_seq: u64,
}

impl BoardState {
    // =========================================================================
    // SNAPSHOTS
    // =========================================================================

    /// Replace the note list with a fresh snapshot.
    pub fn apply_snapshot(&mut self, notes: Vec<Note>) {
        self.drags.retain(|id, overlay| {
            let Some(note) = notes.iter().find(|n| n.id == *id) else {
                return false;
            };
            if overlay.is_dragging() {
                overlay.synced |= overlay.acknowledged;
                return true;
            }
            !overlay.acknowledged && overlay.awaiting != Some(note.position())
        });
        self.notes = notes;
        self.load = LoadState::Ready;
    }

    pub fn fail_subscription(&mut self, message: impl Into<String>) {
        self.load = LoadState::Failed(message.into());
    }

    /// Whether `parent_id` answers the current subscription.
    pub fn is_current_subscription(&self, parent_id: Option<Uuid>) -> bool {
        match (self.subscription, parent_id) {
            (Some(sub), Some(parent)) => sub.request_id == parent,
            _ => false,
        }
    }

    /// Clear everything tied to the current identity's view of the board.
    pub fn reset_view(&mut self) {
        self.load = LoadState::Loading;
        self.notes.clear();
        self.subscription = None;
        self.drags.clear();
        self.banner = None;
        self.toast = None;
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Position to render: the local overlay if any, else the stored one.
    pub fn display_position(&self, note: &Note) -> Position {
        self.drags
            .get(&note.id)
            .map_or_else(|| note.position(), |overlay| overlay.position)
    }

    // =========================================================================
    // DRAGGING
    // =========================================================================

    /// Start dragging `id` with the pointer at `pointer`. Returns `false` for
    /// unknown notes.
    pub fn begin_drag(&mut self, id: NoteId, pointer: Position) -> bool {
        let Some(note) = self.note(id) else {
            return false;
        };
        let origin = self.display_position(note);
        let overlay = match self.drags.get(&id) {
            Some(previous) => DragOverlay {
                position: origin,
                session: Some(DragSession::begin(origin, pointer)),
                ..*previous
            },
            None => DragOverlay {
                position: origin,
                session: Some(DragSession::begin(origin, pointer)),
                awaiting: None,
                move_request: None,
                acknowledged: false,
                synced: false,
            },
        };
        self.drags.insert(id, overlay);
        true
    }

    /// Move the dragged note. Returns a position to commit, if one is due.
    pub fn drag_to(&mut self, id: NoteId, pointer: Position, now_ms: f64) -> Option<Position> {
        let overlay = self.drags.get_mut(&id)?;
        let session = overlay.session.as_mut()?;
        let commit = session.on_move(pointer, now_ms);
        overlay.position = session.current();
        if let Some(at) = commit {
            overlay.commit(at);
        }
        commit
    }

    /// Finish the drag. Returns the final position to commit, if any.
    pub fn end_drag(&mut self, id: NoteId) -> Option<Position> {
        let overlay = self.drags.get_mut(&id)?;
        let commit = overlay.session.take()?.on_release();
        if let Some(at) = commit {
            overlay.commit(at);
        }
        let awaiting = overlay.awaiting;
        let synced = overlay.synced;
        let settled =
            awaiting.is_none() || synced || self.note(id).is_some_and(|n| Some(n.position()) == awaiting);
        if settled {
            self.drags.remove(&id);
        }
        commit
    }

    /// Record the `note:move` request that carries the last commit for `id`.
    pub fn track_move(&mut self, id: NoteId, request_id: Uuid) {
        if let Some(overlay) = self.drags.get_mut(&id) {
            overlay.move_request = Some(request_id);
        }
    }

    /// Mark the overlay waiting on `request_id` as acknowledged. Replies to
    /// superseded moves are ignored.
    pub fn acknowledge_move(&mut self, request_id: Option<Uuid>) {
        let Some(request_id) = request_id else {
            return;
        };
        if let Some(overlay) = self.drags.values_mut().find(|o| o.move_request == Some(request_id)) {
            overlay.acknowledged = true;
        }
    }

    /// Drop overlays that are not being dragged so notes fall back to the
    /// stored position. Used when a move write fails or the socket drops.
    pub fn revert_settled_drags(&mut self) {
        self.drags.retain(|_, overlay| overlay.is_dragging());
    }

    // =========================================================================
    // NOTICES
    // =========================================================================

    pub fn show_banner(&mut self, message: impl Into<String>) {
        self.banner = Some(message.into());
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Show a toast and return its sequence number for `clear_toast`.
    pub fn show_toast(&mut self, message: impl Into<String>) -> u64 {
        self.toast_seq += 1;
        self.toast = Some(Toast { seq: self.toast_seq, message: message.into() });
        self.toast_seq
    }

    /// Clear the toast only if it is still the one numbered `seq`.
    pub fn clear_toast(&mut self, seq: u64) {
        if self.toast.as_ref().is_some_and(|t| t.seq == seq) {
            self.toast = None;
        }
    }
}
