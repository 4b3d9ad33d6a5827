//! Seeded decoration: floating-heart placement and note tilt.
//!
//! Both are pure functions of a seed so server render, hydration and every
//! re-render agree, and so the values are testable.

#[cfg(test)]
#[path = "decoration_test.rs"]
mod decoration_test;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// Seed for the board's ambient hearts.
pub const HEART_SEED: u64 = 0x14_02_2025;
pub const HEART_COUNT: usize = 6;

/// Largest tilt, in degrees, either way.
pub const MAX_TILT_DEG: f64 = 3.0;

/// Placement and timing of one floating heart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeartSpec {
    /// Horizontal offset in percent of the board width, `[0, 100)`.
    pub left_pct: f64,
    /// Animation delay in seconds, `[0, 5)`.
    pub delay_s: f64,
    /// Animation duration in seconds, `[8, 12)`.
    pub duration_s: f64,
}

pub fn floating_hearts(seed: u64, count: usize) -> Vec<HeartSpec> {
    (0..count)
        .map(|index| {
            let mut rng = StdRng::seed_from_u64(seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
            HeartSpec {
                left_pct: rng.random_range(0.0..100.0),
                delay_s: rng.random_range(0.0..5.0),
                duration_s: rng.random_range(8.0..12.0),
            }
        })
        .collect()
}

/// Rotation for a note in `[-3°, 3°)`, fixed for the note's lifetime.
pub fn note_tilt_deg(id: Uuid) -> f64 {
    let (hi, lo) = id.as_u64_pair();
    let mut rng = StdRng::seed_from_u64(hi ^ lo);
    rng.random_range(-MAX_TILT_DEG..MAX_TILT_DEG)
}
