//! Day-scoping arithmetic for the "notes created today" live query.

#[cfg(test)]
#[path = "day_test.rs"]
mod day_test;

pub const MS_PER_DAY: i64 = 86_400_000;

/// Start of the local calendar day containing `now_ms`.
///
/// `utc_offset_minutes` is east-positive (UTC+2 is `120`). The offset in
/// effect at `now_ms` is applied to the whole day, so on a DST transition day
/// the boundary may be off by the shift.
#[must_use]
pub fn day_start_ms(now_ms: i64, utc_offset_minutes: i32) -> i64 {
    let offset_ms = i64::from(utc_offset_minutes) * 60_000;
    (now_ms + offset_ms).div_euclid(MS_PER_DAY) * MS_PER_DAY - offset_ms
}

/// Whether a creation timestamp falls inside the scope starting at `day_start`.
#[must_use]
pub fn in_scope(timestamp: i64, day_start: i64) -> bool {
    timestamp >= day_start
}
