//! Request frame builders for every board syscall.
//!
//! Builders are pure so the payload shapes can be tested without a socket.
//! Subscription builders also record the standing request on `BoardState`,
//! since snapshot items are matched against its id.

#[cfg(test)]
#[path = "requests_test.rs"]
mod requests_test;

use notes::frame::{Data, Frame};
use notes::{NoteColor, NoteId, Position, ReactionEmoji, Viewport};

use crate::state::board::{BoardState, Subscription};

/// Start (or restart) the live query for notes created since `day_start`.
pub fn subscribe(board: &mut BoardState, day_start: i64) -> Frame {
    let frame = Frame::request("notes:subscribe", Data::new()).with_day_start(day_start);
    board.subscription = Some(Subscription { request_id: frame.id, day_start });
    frame
}

/// Release the live query. Returns `None` when nothing is subscribed.
pub fn unsubscribe(board: &mut BoardState) -> Option<Frame> {
    board.subscription.take()?;
    Some(Frame::request("notes:unsubscribe", Data::new()))
}

pub fn create(content: &str, color: NoteColor, author: &str, viewport: Viewport) -> Frame {
    Frame::request("note:create", Data::new())
        .with_data("content", content)
        .with_data("color", color.name())
        .with_data("author", author)
        .with_data("viewport", serde_json::json!({ "width": viewport.width, "height": viewport.height }))
}

pub fn move_to(id: NoteId, position: Position) -> Frame {
    Frame::request("note:move", Data::new()).with_note_id(id).with_position(position)
}

pub fn delete(id: NoteId) -> Frame {
    Frame::request("note:delete", Data::new()).with_note_id(id)
}

pub fn react(id: NoteId, emoji: ReactionEmoji, author: &str) -> Frame {
    Frame::request("note:react", Data::new())
        .with_note_id(id)
        .with_data("emoji", emoji.glyph())
        .with_data("author", author)
}
