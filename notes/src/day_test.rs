use super::*;

// 2024-02-14T15:30:00Z
const VALENTINES_AFTERNOON: i64 = 1_707_924_600_000;
// 2024-02-14T00:00:00Z
const VALENTINES_MIDNIGHT_UTC: i64 = 1_707_868_800_000;

#[test]
fn day_start_in_utc_is_midnight() {
    assert_eq!(day_start_ms(VALENTINES_AFTERNOON, 0), VALENTINES_MIDNIGHT_UTC);
}

#[test]
fn day_start_is_idempotent_at_midnight() {
    assert_eq!(day_start_ms(VALENTINES_MIDNIGHT_UTC, 0), VALENTINES_MIDNIGHT_UTC);
}

#[test]
fn day_start_honours_positive_offset() {
    // 15:30Z is 01:30 next day in UTC+10, so the local day began 14:00Z.
    let start = day_start_ms(VALENTINES_AFTERNOON, 600);
    assert_eq!(start, VALENTINES_MIDNIGHT_UTC + 14 * 3_600_000);
}

#[test]
fn day_start_honours_negative_offset() {
    // 15:30Z is 07:30 in UTC-8; local midnight was 08:00Z.
    let start = day_start_ms(VALENTINES_AFTERNOON, -480);
    assert_eq!(start, VALENTINES_MIDNIGHT_UTC + 8 * 3_600_000);
}

#[test]
fn in_scope_includes_boundary_and_excludes_yesterday() {
    let start = VALENTINES_MIDNIGHT_UTC;
    assert!(in_scope(start, start));
    assert!(in_scope(start + 1, start));
    assert!(!in_scope(start - 1, start));
}
