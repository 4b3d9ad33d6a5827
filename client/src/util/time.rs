//! Time formatting for note stamps and the player's progress labels.

#[cfg(test)]
#[path = "time_test.rs"]
mod time_test;

use notes::day::MS_PER_DAY;

/// Format whole seconds as `m:ss`. Negative and non-finite input reads `0:00`.
pub fn format_track_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_owned();
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Wall-clock `HH:MM` for an epoch-ms timestamp in the given east-positive
/// UTC offset.
pub fn format_clock(timestamp_ms: i64, utc_offset_minutes: i32) -> String {
    let local = timestamp_ms + i64::from(utc_offset_minutes) * 60_000;
    let minute_of_day = local.rem_euclid(MS_PER_DAY) / 60_000;
    format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60)
}

/// Browser's current UTC offset in minutes, east-positive. Zero during SSR.
pub fn local_utc_offset_minutes() -> i32 {
    #[cfg(feature = "hydrate")]
    {
        // getTimezoneOffset is west-positive.
        #[allow(clippy::cast_possible_truncation)]
        let west = js_sys::Date::new_0().get_timezone_offset() as i32;
        -west
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0
    }
}

/// Start of the browser's local day, as sent with `notes:subscribe`.
pub fn local_day_start_ms() -> i64 {
    notes::day::day_start_ms(notes::now_ms(), local_utc_offset_minutes())
}
