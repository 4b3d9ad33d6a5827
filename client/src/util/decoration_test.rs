use super::*;

#[test]
fn hearts_are_deterministic_per_seed() {
    assert_eq!(floating_hearts(HEART_SEED, HEART_COUNT), floating_hearts(HEART_SEED, HEART_COUNT));
    assert_ne!(floating_hearts(1, HEART_COUNT), floating_hearts(2, HEART_COUNT));
}

#[test]
fn hearts_stay_inside_their_ranges() {
    for seed in 0..50 {
        let hearts = floating_hearts(seed, HEART_COUNT);
        assert_eq!(hearts.len(), HEART_COUNT);
        for heart in hearts {
            assert!((0.0..100.0).contains(&heart.left_pct));
            assert!((0.0..5.0).contains(&heart.delay_s));
            assert!((8.0..12.0).contains(&heart.duration_s));
        }
    }
}

#[test]
fn heart_prefix_is_stable_when_count_grows() {
    let six = floating_hearts(HEART_SEED, 6);
    let eight = floating_hearts(HEART_SEED, 8);
    assert_eq!(six[..], eight[..6]);
}

#[test]
fn tilt_is_stable_and_bounded() {
    for _ in 0..200 {
        let id = Uuid::new_v4();
        let tilt = note_tilt_deg(id);
        assert!((-MAX_TILT_DEG..MAX_TILT_DEG).contains(&tilt));
        assert!((tilt - note_tilt_deg(id)).abs() < f64::EPSILON);
    }
}
