//! Background music player state.
//!
//! DESIGN
//! ======
//! The `<audio>` element is the source of truth for playback; this model
//! mirrors what the widget renders. Elapsed time is polled from the element,
//! so `progress` is clamped against the catalog duration rather than trusted.

#[cfg(test)]
#[path = "player_test.rs"]
mod player_test;

use crate::util::time::format_track_time;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Track {
    pub title: &'static str,
    pub artist: &'static str,
    pub duration_s: f64,
    pub src: &'static str,
}

pub const TRACKS: [Track; 3] = [
    Track { title: "Perfect", artist: "Ed Sheeran", duration_s: 263.0, src: "/placeholder-audio.mp3" },
    Track { title: "All of Me", artist: "John Legend", duration_s: 269.0, src: "/placeholder-audio.mp3" },
    Track { title: "Thinking Out Loud", artist: "Ed Sheeran", duration_s: 281.0, src: "/placeholder-audio.mp3" },
];

pub const DEFAULT_VOLUME: f64 = 0.7;
pub const VOLUME_STEP: f64 = 0.1;
/// Interval for reading `currentTime` from the media element.
pub const PROGRESS_POLL_MS: u32 = 250;

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub track_index: usize,
    pub is_playing: bool,
    pub elapsed_s: f64,
    pub volume: f64,
    pub liked: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self { track_index: 0, is_playing: false, elapsed_s: 0.0, volume: DEFAULT_VOLUME, liked: false }
    }
}

impl PlayerState {
    pub fn track(&self) -> Track {
        TRACKS[self.track_index % TRACKS.len()]
    }

    pub fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
    }

    /// Advance to the next track, wrapping, and restart from zero.
    pub fn next(&mut self) {
        self.track_index = (self.track_index + 1) % TRACKS.len();
        self.elapsed_s = 0.0;
    }

    /// Step back to the previous track, wrapping, and restart from zero.
    pub fn previous(&mut self) {
        self.track_index = (self.track_index + TRACKS.len() - 1) % TRACKS.len();
        self.elapsed_s = 0.0;
    }

    pub fn set_elapsed(&mut self, seconds: f64) {
        self.elapsed_s = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    }

    /// Clamp to `[0, 1]`; NaN falls back to the default.
    pub fn set_volume(&mut self, volume: f64) {
        self.volume = if volume.is_nan() { DEFAULT_VOLUME } else { volume.clamp(0.0, 1.0) };
    }

    pub fn toggle_like(&mut self) {
        self.liked = !self.liked;
    }

    /// Fraction of the current track played, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let duration = self.track().duration_s;
        if duration <= 0.0 {
            return 0.0;
        }
        (self.elapsed_s / duration).clamp(0.0, 1.0)
    }

    pub fn elapsed_label(&self) -> String {
        format_track_time(self.elapsed_s)
    }

    pub fn duration_label(&self) -> String {
        format_track_time(self.track().duration_s)
    }
}
