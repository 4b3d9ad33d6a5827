use super::*;
use notes::{NoteColor, Reaction, ReactionEmoji};

fn note(content: &str, x: f64, y: f64, timestamp: i64) -> Note {
    Note {
        id: Uuid::new_v4(),
        content: content.to_owned(),
        author: "You".to_owned(),
        color: NoteColor::Blush,
        x,
        y,
        timestamp,
        reactions: Vec::new(),
        is_today: true,
    }
}

fn moved(mut n: Note, x: f64, y: f64) -> Note {
    n.x = x;
    n.y = y;
    n
}

fn p(x: f64, y: f64) -> Position {
    Position::new(x, y)
}

// =============================================================
// Snapshots
// =============================================================

#[test]
fn board_state_starts_loading_and_disconnected() {
    let state = BoardState::default();
    assert_eq!(state.load, LoadState::Loading);
    assert_eq!(state.connection_status, ConnectionStatus::Disconnected);
    assert!(state.notes.is_empty());
}

#[test]
fn snapshot_replaces_notes_wholesale() {
    let mut state = BoardState::default();
    let a = note("a", 0.0, 0.0, 2);
    let b = note("b", 0.0, 0.0, 1);
    state.apply_snapshot(vec![a.clone(), b]);
    assert_eq!(state.load, LoadState::Ready);
    assert_eq!(state.notes.len(), 2);

    let mut a2 = a.clone();
    a2.reactions.push(Reaction { id: Uuid::new_v4(), emoji: ReactionEmoji::Heart, author: "You".into(), timestamp: 3 });
    state.apply_snapshot(vec![a2.clone()]);
    assert_eq!(state.notes, vec![a2]);
}

#[test]
fn empty_snapshot_is_ready_not_loading() {
    let mut state = BoardState::default();
    state.apply_snapshot(Vec::new());
    assert_eq!(state.load, LoadState::Ready);
}

#[test]
fn failure_supersedes_loading() {
    let mut state = BoardState::default();
    state.fail_subscription("change feed closed");
    assert_eq!(state.load, LoadState::Failed("change feed closed".into()));
}

#[test]
fn current_subscription_matches_by_request_id() {
    let mut state = BoardState::default();
    let id = Uuid::new_v4();
    assert!(!state.is_current_subscription(Some(id)));
    state.subscription = Some(Subscription { request_id: id, day_start: 0 });
    assert!(state.is_current_subscription(Some(id)));
    assert!(!state.is_current_subscription(Some(Uuid::new_v4())));
    assert!(!state.is_current_subscription(None));
}

#[test]
fn reset_view_clears_everything_local() {
    let mut state = BoardState::default();
    state.apply_snapshot(vec![note("a", 0.0, 0.0, 1)]);
    state.subscription = Some(Subscription { request_id: Uuid::new_v4(), day_start: 0 });
    state.show_banner("x");
    state.show_toast("y");
    state.reset_view();
    assert_eq!(state.load, LoadState::Loading);
    assert!(state.notes.is_empty());
    assert!(state.subscription.is_none());
    assert!(state.banner.is_none());
    assert!(state.toast.is_none());
}

// =============================================================
// Drag overlays
// =============================================================

#[test]
fn drag_overlay_moves_note_locally() {
    let mut state = BoardState::default();
    let n = note("drag", 100.0, 100.0, 1);
    let id = n.id;
    state.apply_snapshot(vec![n.clone()]);

    assert!(state.begin_drag(id, p(10.0, 10.0)));
    assert_eq!(state.drag_to(id, p(30.0, 5.0), 0.0), Some(p(120.0, 95.0)));
    assert_eq!(state.display_position(&n), p(120.0, 95.0));
}

#[test]
fn begin_drag_on_unknown_note_is_rejected() {
    let mut state = BoardState::default();
    assert!(!state.begin_drag(Uuid::new_v4(), p(0.0, 0.0)));
    assert!(state.drags.is_empty());
}

#[test]
fn overlay_survives_stale_snapshot_until_commit_lands() {
    let mut state = BoardState::default();
    let n = note("drag", 0.0, 0.0, 1);
    let id = n.id;
    state.apply_snapshot(vec![n.clone()]);

    state.begin_drag(id, p(0.0, 0.0));
    state.drag_to(id, p(10.0, 10.0), 0.0);
    state.drag_to(id, p(50.0, 50.0), 20.0);
    assert_eq!(state.end_drag(id), Some(p(50.0, 50.0)));

    // Snapshot from the intermediate commit must not snap the note back.
    state.apply_snapshot(vec![moved(n.clone(), 10.0, 10.0)]);
    assert_eq!(state.display_position(&state.notes[0].clone()), p(50.0, 50.0));

    state.apply_snapshot(vec![moved(n, 50.0, 50.0)]);
    assert!(state.drags.is_empty());
}

#[test]
fn partner_move_wins_once_our_move_is_acknowledged() {
    let mut state = BoardState::default();
    let n = note("contested", 0.0, 0.0, 1);
    let id = n.id;
    state.apply_snapshot(vec![n.clone()]);

    state.begin_drag(id, p(0.0, 0.0));
    assert_eq!(state.drag_to(id, p(50.0, 50.0), 0.0), Some(p(50.0, 50.0)));
    let request = Uuid::new_v4();
    state.track_move(id, request);
    state.end_drag(id);
    state.acknowledge_move(Some(request));

    // The other user moved the note right after our write landed.
    state.apply_snapshot(vec![moved(n.clone(), 200.0, 200.0)]);
    assert!(state.drags.is_empty());
    assert_eq!(state.display_position(&state.notes[0].clone()), p(200.0, 200.0));

    state.apply_snapshot(vec![moved(n, 200.0, 200.0)]);
    assert_eq!(state.display_position(&state.notes[0].clone()), p(200.0, 200.0));
}

#[test]
fn reply_to_superseded_move_keeps_overlay() {
    let mut state = BoardState::default();
    let n = note("busy", 0.0, 0.0, 1);
    let id = n.id;
    state.apply_snapshot(vec![n.clone()]);

    state.begin_drag(id, p(0.0, 0.0));
    state.drag_to(id, p(10.0, 10.0), 0.0);
    let first = Uuid::new_v4();
    state.track_move(id, first);
    state.drag_to(id, p(50.0, 50.0), 200.0);
    let second = Uuid::new_v4();
    state.track_move(id, second);
    state.end_drag(id);

    state.acknowledge_move(Some(first));
    state.apply_snapshot(vec![moved(n.clone(), 10.0, 10.0)]);
    assert_eq!(state.display_position(&state.notes[0].clone()), p(50.0, 50.0));

    state.acknowledge_move(Some(second));
    state.apply_snapshot(vec![moved(n, 80.0, 80.0)]);
    assert!(state.drags.is_empty());
}

#[test]
fn acknowledged_commit_during_drag_settles_on_release() {
    let mut state = BoardState::default();
    let n = note("held", 0.0, 0.0, 1);
    let id = n.id;
    state.apply_snapshot(vec![n.clone()]);

    state.begin_drag(id, p(0.0, 0.0));
    state.drag_to(id, p(40.0, 40.0), 0.0);
    let request = Uuid::new_v4();
    state.track_move(id, request);
    state.acknowledge_move(Some(request));
    state.apply_snapshot(vec![moved(n, 300.0, 300.0)]);
    assert!(state.drags.contains_key(&id));

    assert_eq!(state.end_drag(id), None);
    assert!(state.drags.is_empty());
}

#[test]
fn unacknowledged_overlay_ignores_foreign_position() {
    let mut state = BoardState::default();
    let n = note("waiting", 0.0, 0.0, 1);
    let id = n.id;
    state.apply_snapshot(vec![n.clone()]);

    state.begin_drag(id, p(0.0, 0.0));
    state.drag_to(id, p(25.0, 25.0), 0.0);
    state.track_move(id, Uuid::new_v4());
    state.end_drag(id);

    state.apply_snapshot(vec![moved(n.clone(), 200.0, 200.0)]);
    assert_eq!(state.display_position(&state.notes[0].clone()), p(25.0, 25.0));
    state.acknowledge_move(None);
    assert!(state.drags.contains_key(&id));
}

#[test]
fn overlay_dropped_when_note_disappears() {
    let mut state = BoardState::default();
    let n = note("gone", 0.0, 0.0, 1);
    state.apply_snapshot(vec![n.clone()]);
    state.begin_drag(n.id, p(0.0, 0.0));
    state.drag_to(n.id, p(5.0, 5.0), 0.0);

    state.apply_snapshot(Vec::new());
    assert!(state.drags.is_empty());
}

#[test]
fn click_without_move_leaves_no_overlay() {
    let mut state = BoardState::default();
    let n = note("still", 7.0, 7.0, 1);
    state.apply_snapshot(vec![n.clone()]);
    state.begin_drag(n.id, p(1.0, 1.0));
    assert_eq!(state.end_drag(n.id), None);
    assert!(state.drags.is_empty());
}

#[test]
fn revert_keeps_only_active_drags() {
    let mut state = BoardState::default();
    let a = note("a", 0.0, 0.0, 2);
    let b = note("b", 0.0, 0.0, 1);
    state.apply_snapshot(vec![a.clone(), b.clone()]);

    state.begin_drag(a.id, p(0.0, 0.0));
    state.drag_to(a.id, p(9.0, 9.0), 0.0);
    state.end_drag(a.id);
    state.begin_drag(b.id, p(0.0, 0.0));

    state.revert_settled_drags();
    assert!(!state.drags.contains_key(&a.id));
    assert!(state.drags.contains_key(&b.id));
}

// =============================================================
// Notices
// =============================================================

#[test]
fn banner_shows_and_dismisses() {
    let mut state = BoardState::default();
    state.show_banner(CREATE_FAILED_MESSAGE);
    assert_eq!(state.banner.as_deref(), Some(CREATE_FAILED_MESSAGE));
    state.dismiss_banner();
    assert!(state.banner.is_none());
}

#[test]
fn stale_toast_timer_does_not_clear_newer_toast() {
    let mut state = BoardState::default();
    let first = state.show_toast("delete failed");
    let second = state.show_toast("move failed");
    state.clear_toast(first);
    assert_eq!(state.toast.as_ref().map(|t| t.message.as_str()), Some("move failed"));
    state.clear_toast(second);
    assert!(state.toast.is_none());
}
