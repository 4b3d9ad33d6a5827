//! Apply inbound frames to board state.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is logged. Create failures raise the banner, other write
//! failures raise a toast, and a failed live query replaces the board with
//! the connection error screen. Nothing is retried automatically.

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;

use notes::frame::{Frame, Status};

use crate::state::board::{BoardState, CREATE_FAILED_MESSAGE, ConnectionStatus};

pub const DELETE_FAILED_MESSAGE: &str = "Couldn't delete that note.";
pub const MOVE_FAILED_MESSAGE: &str = "Couldn't move that note.";
pub const REACT_FAILED_MESSAGE: &str = "Couldn't add your reaction.";

/// Follow-up the socket loop has to perform after a frame is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Re-send `notes:subscribe` for this day; the old request died with
    /// the previous connection.
    Resubscribe(i64),
    /// Schedule clearing of the toast with this sequence number.
    ClearToastLater(u64),
}

pub fn apply_frame(board: &mut BoardState, frame: &Frame) -> Effect {
    match (frame.syscall.as_str(), frame.status) {
        ("session:connected", _) => {
            board.connection_status = ConnectionStatus::Connected;
            board.self_client_id = frame.data_str("client_id").map(str::to_owned);
            // Replies to moves sent on the old socket will never arrive.
            board.revert_settled_drags();
            match board.subscription {
                Some(sub) => Effect::Resubscribe(sub.day_start),
                None => Effect::None,
            }
        }
        ("notes:subscribe", Status::Item) => {
            if !board.is_current_subscription(frame.parent_id) {
                return Effect::None;
            }
            match frame.snapshot_notes() {
                Some(notes) => board.apply_snapshot(notes),
                None => leptos::logging::warn!("notes:subscribe item without a readable snapshot"),
            }
            Effect::None
        }
        ("notes:subscribe", Status::Error) => {
            if !board.is_current_subscription(frame.parent_id) {
                return Effect::None;
            }
            let message = error_text(frame);
            leptos::logging::warn!("live query failed: {message}");
            board.fail_subscription(message);
            Effect::None
        }
        ("note:create", Status::Error) => {
            leptos::logging::warn!("note:create failed: {}", error_text(frame));
            board.show_banner(CREATE_FAILED_MESSAGE);
            Effect::None
        }
        ("note:move", Status::Done) => {
            board.acknowledge_move(frame.parent_id);
            Effect::None
        }
        ("note:move", Status::Error) => {
            leptos::logging::warn!("note:move failed: {}", error_text(frame));
            board.revert_settled_drags();
            Effect::ClearToastLater(board.show_toast(MOVE_FAILED_MESSAGE))
        }
        ("note:delete", Status::Error) => {
            leptos::logging::warn!("note:delete failed: {}", error_text(frame));
            Effect::ClearToastLater(board.show_toast(DELETE_FAILED_MESSAGE))
        }
        ("note:react", Status::Error) => {
            leptos::logging::warn!("note:react failed: {}", error_text(frame));
            Effect::ClearToastLater(board.show_toast(REACT_FAILED_MESSAGE))
        }
        ("gateway:error", _) => {
            leptos::logging::warn!("gateway:error: {}", error_text(frame));
            Effect::None
        }
        _ => Effect::None,
    }
}

fn error_text(frame: &Frame) -> String {
    frame.error_message().unwrap_or("unknown error").to_owned()
}
