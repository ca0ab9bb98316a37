//! Generated values, schedule entries, and the batch that pairs them

use serde::{Deserialize, Serialize};
use chrono::NaiveDateTime;
use crate::SLOT_COUNT;

/// A bounded value and its rendered text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedValue {
    /// Clamped value, always within [VALUE_MIN, VALUE_MAX]
    pub value: f64,
    /// Two decimals plus unit marker, e.g. "7.42x"
    pub text: String,
}

impl GeneratedValue {
    /// Wrap an already-clamped value
    pub fn new(value: f64, suffix: &str) -> Self {
        Self {
            value,
            text: format!("{:.2}{}", value, suffix),
        }
    }
}

/// One schedule offset resolved to wall-clock text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Minutes after generation time
    pub offset_minutes: u32,
    /// "h:mm AM/PM"
    pub text: String,
}

/// One slot of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub value: GeneratedValue,
    pub time: ScheduleEntry,
}

/// Exactly four (value, schedule time) pairs from one generation cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    /// Wall-clock time the batch was produced
    pub generated_at: NaiveDateTime,
    /// Seed the values were synthesized from
    pub seed: f64,
    pub entries: [BatchEntry; SLOT_COUNT],
}

impl Batch {
    /// Pair values with schedule entries slot by slot
    pub fn assemble(
        generated_at: NaiveDateTime,
        seed: f64,
        values: [GeneratedValue; SLOT_COUNT],
        times: [ScheduleEntry; SLOT_COUNT],
    ) -> Self {
        let entries = std::array::from_fn(|i| BatchEntry {
            value: values[i].clone(),
            time: times[i].clone(),
        });
        Self { generated_at, seed, entries }
    }
}
