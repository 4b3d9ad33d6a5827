use super::*;
use notes::frame::Data;
use notes::{Note, NoteColor, NoteId, Position};
use uuid::Uuid;

use crate::net::requests;

fn note(content: &str, timestamp: i64) -> Note {
    Note {
        id: Uuid::new_v4(),
        content: content.to_owned(),
        author: "You".to_owned(),
        color: NoteColor::Blush,
        x: 10.0,
        y: 120.0,
        timestamp,
        reactions: Vec::new(),
        is_today: true,
    }
}

fn snapshot_item(request: &Frame, notes: &[Note]) -> Frame {
    request.snapshot(notes)
}

fn subscribed() -> (BoardState, Frame) {
    let mut board = BoardState::default();
    let request = requests::subscribe(&mut board, 1_000);
    (board, request)
}

#[test]
fn session_connected_without_subscription() {
    let mut board = BoardState::default();
    let welcome = Frame::request("session:connected", Data::new()).with_data("client_id", "abc");
    assert_eq!(apply_frame(&mut board, &welcome), Effect::None);
    assert_eq!(board.connection_status, ConnectionStatus::Connected);
    assert_eq!(board.self_client_id.as_deref(), Some("abc"));
}

#[test]
fn session_connected_asks_to_resubscribe() {
    let (mut board, _) = subscribed();
    let welcome = Frame::request("session:connected", Data::new()).with_data("client_id", "abc");
    assert_eq!(apply_frame(&mut board, &welcome), Effect::Resubscribe(1_000));
}

#[test]
fn snapshot_replaces_notes_and_ends_loading() {
    let (mut board, request) = subscribed();
    let first = vec![note("a", 2_000), note("b", 1_500)];
    apply_frame(&mut board, &snapshot_item(&request, &first));
    assert_eq!(board.load, crate::state::board::LoadState::Ready);
    assert_eq!(board.notes, first);

    let second = vec![note("c", 3_000)];
    apply_frame(&mut board, &snapshot_item(&request, &second));
    assert_eq!(board.notes, second);
}

#[test]
fn stale_subscription_items_are_ignored() {
    let (mut board, stale) = subscribed();
    let _current = requests::subscribe(&mut board, 1_000);
    apply_frame(&mut board, &snapshot_item(&stale, &[note("old", 2_000)]));
    assert!(board.notes.is_empty());
    assert_eq!(board.load, crate::state::board::LoadState::Loading);
}

#[test]
fn subscription_error_supersedes_loading() {
    let (mut board, request) = subscribed();
    apply_frame(&mut board, &request.error("change feed closed"));
    assert_eq!(board.load, crate::state::board::LoadState::Failed("change feed closed".into()));
}

#[test]
fn create_error_raises_banner() {
    let mut board = BoardState::default();
    let req = requests::create("hi", NoteColor::Sky, "You", notes::Viewport::default());
    assert_eq!(apply_frame(&mut board, &req.error("database error")), Effect::None);
    assert_eq!(board.banner.as_deref(), Some(CREATE_FAILED_MESSAGE));
    assert!(board.toast.is_none());
}

#[test]
fn write_errors_raise_toasts() {
    let mut board = BoardState::default();
    let id: NoteId = Uuid::new_v4();

    let effect = apply_frame(&mut board, &requests::delete(id).error("note not found"));
    let Effect::ClearToastLater(seq) = effect else {
        panic!("expected toast effect, got {effect:?}");
    };
    assert_eq!(board.toast.as_ref().map(|t| (t.seq, t.message.as_str())), Some((seq, DELETE_FAILED_MESSAGE)));

    let effect = apply_frame(&mut board, &requests::react(id, notes::ReactionEmoji::Heart, "You").error("x"));
    assert!(matches!(effect, Effect::ClearToastLater(next) if next > seq));
    assert_eq!(board.toast.as_ref().map(|t| t.message.as_str()), Some(REACT_FAILED_MESSAGE));
}

#[test]
fn move_error_reverts_settled_overlay() {
    let (mut board, request) = subscribed();
    let n = note("drag me", 2_000);
    let id = n.id;
    apply_frame(&mut board, &snapshot_item(&request, &[n]));

    assert!(board.begin_drag(id, Position::new(0.0, 0.0)));
    board.drag_to(id, Position::new(50.0, 50.0), 1_000.0);
    board.end_drag(id);
    assert!(board.drags.contains_key(&id));

    let effect = apply_frame(&mut board, &requests::move_to(id, Position::new(60.0, 170.0)).error("db"));
    assert!(matches!(effect, Effect::ClearToastLater(_)));
    assert!(board.drags.is_empty());
    assert_eq!(board.toast.as_ref().map(|t| t.message.as_str()), Some(MOVE_FAILED_MESSAGE));
}

#[test]
fn done_frames_change_nothing() {
    let mut board = BoardState::default();
    let before = board.clone();
    apply_frame(&mut board, &requests::delete(Uuid::new_v4()).done());
    assert_eq!(board.notes, before.notes);
    assert!(board.toast.is_none() && board.banner.is_none());
}

#[test]
fn move_done_lets_next_snapshot_settle_overlay() {
    let (mut board, request) = subscribed();
    let n = note("shared", 2_000);
    let id = n.id;
    apply_frame(&mut board, &snapshot_item(&request, &[n.clone()]));

    board.begin_drag(id, Position::new(0.0, 0.0));
    let at = board.drag_to(id, Position::new(50.0, 50.0), 1_000.0).expect("commit");
    let move_frame = requests::move_to(id, at);
    board.track_move(id, move_frame.id);
    board.end_drag(id);

    assert_eq!(apply_frame(&mut board, &move_frame.done()), Effect::None);
    assert!(board.drags.contains_key(&id));

    let mut elsewhere = n;
    elsewhere.x = 400.0;
    elsewhere.y = 300.0;
    apply_frame(&mut board, &snapshot_item(&request, &[elsewhere]));
    assert!(board.drags.is_empty());
    assert_eq!(board.display_position(&board.notes[0].clone()), Position::new(400.0, 300.0));
}

#[test]
fn reconnect_drops_overlays_awaiting_replies() {
    let (mut board, request) = subscribed();
    let n = note("orphaned", 2_000);
    let id = n.id;
    apply_frame(&mut board, &snapshot_item(&request, &[n]));

    board.begin_drag(id, Position::new(0.0, 0.0));
    board.drag_to(id, Position::new(30.0, 30.0), 1_000.0);
    board.end_drag(id);
    assert!(board.drags.contains_key(&id));

    let welcome = Frame::request("session:connected", Data::new()).with_data("client_id", "abc");
    apply_frame(&mut board, &welcome);
    assert!(board.drags.is_empty());
}
