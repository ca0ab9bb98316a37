//! SeedSource: scalar in [0, 1) derived from the time of day
//!
//! seed = ((h*3600 + m*60 + s) mod 1000) / 1000

use chrono::{NaiveDateTime, Timelike};
use crate::core::clock::Clock;

/// Seed for the current wall-clock second
pub fn seed(clock: &dyn Clock) -> f64 {
    seed_at(clock.now())
}

/// Seed for a given wall-clock time; equal within the same second
pub fn seed_at(at: NaiveDateTime) -> f64 {
    let secs = at.hour() * 3600 + at.minute() * 60 + at.second();
    (secs % 1000) as f64 / 1000.0
}
