use super::*;

fn p(x: f64, y: f64) -> Position {
    Position::new(x, y)
}

#[test]
fn position_follows_pointer_delta() {
    let drag = DragSession::begin(p(100.0, 200.0), p(10.0, 10.0));
    assert_eq!(drag.position_for(p(15.0, 4.0)), p(105.0, 194.0));
    assert_eq!(drag.position_for(p(-500.0, 10.0)), p(-410.0, 200.0));
}

#[test]
fn first_move_commits_immediately() {
    let mut drag = DragSession::begin(p(0.0, 0.0), p(0.0, 0.0));
    assert_eq!(drag.on_move(p(5.0, 5.0), 1_000.0), Some(p(5.0, 5.0)));
}

#[test]
fn moves_inside_interval_are_throttled() {
    let mut drag = DragSession::begin(p(0.0, 0.0), p(0.0, 0.0));
    let mut commits = 0;
    // 60 moves at ~16 ms apart, just under one second.
    for i in 0..60 {
        let t = f64::from(i) * 16.0;
        if drag.on_move(p(f64::from(i), 0.0), t).is_some() {
            commits += 1;
        }
    }
    assert!(commits <= 10, "got {commits} commits");
    assert!(commits >= 9, "got {commits} commits");
}

#[test]
fn release_commits_final_position() {
    let mut drag = DragSession::begin(p(0.0, 0.0), p(0.0, 0.0));
    drag.on_move(p(1.0, 1.0), 0.0);
    assert_eq!(drag.on_move(p(2.0, 2.0), 50.0), None);
    assert_eq!(drag.current(), p(2.0, 2.0));
    assert_eq!(drag.on_release(), Some(p(2.0, 2.0)));
}

#[test]
fn release_skips_already_committed_position() {
    let mut drag = DragSession::begin(p(0.0, 0.0), p(0.0, 0.0));
    drag.on_move(p(3.0, 3.0), 0.0);
    assert_eq!(drag.on_release(), None);
}

#[test]
fn click_without_movement_commits_nothing() {
    let mut drag = DragSession::begin(p(40.0, 40.0), p(1.0, 1.0));
    assert_eq!(drag.on_move(p(1.0, 1.0), 0.0), None);
    assert_eq!(drag.on_release(), None);
}
