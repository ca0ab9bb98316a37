//! ValueSynthesizer: seed → four bounded, formatted values
//!
//! base = 5 + seed * 11, then per slot: base + offset + jitter, clamped to
//! [5.00, 16.00]. Slot order follows OFFSET_SET.

use rand::Rng;
use tracing::debug;
use crate::{VALUE_MIN, VALUE_MAX, BASE_SPAN, OFFSET_SET, JITTER_AMPLITUDE, UNIT_SUFFIX, SLOT_COUNT};
use crate::types::{GeneratedValue, SignalError};

/// Produces the value half of a batch
#[derive(Debug, Clone)]
pub struct ValueSynthesizer {
    suffix: String,
}

impl Default for ValueSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueSynthesizer {
    pub fn new() -> Self {
        Self::with_suffix(UNIT_SUFFIX)
    }

    /// Use a different unit marker after the two decimals
    pub fn with_suffix(suffix: &str) -> Self {
        Self {
            suffix: suffix.to_string(),
        }
    }

    /// Synthesize with fresh jitter drawn from `rng`
    pub fn synthesize<R: Rng + ?Sized>(&self, seed: f64, rng: &mut R) -> [GeneratedValue; SLOT_COUNT] {
        let jitter: [f64; SLOT_COUNT] =
            std::array::from_fn(|_| rng.gen_range(-JITTER_AMPLITUDE..=JITTER_AMPLITUDE));
        self.synthesize_with_jitter(seed, jitter)
    }

    /// Synthesize with caller-supplied jitter, one per slot
    pub fn synthesize_with_jitter(&self, seed: f64, jitter: [f64; SLOT_COUNT]) -> [GeneratedValue; SLOT_COUNT] {
        let base = base_value(seed);
        std::array::from_fn(|i| self.bounded(base + OFFSET_SET[i] + jitter[i]))
    }

    fn bounded(&self, raw: f64) -> GeneratedValue {
        let (value, anomaly) = clamp_value(raw);
        if let Some(err) = anomaly {
            debug!(code = err.code(), "{}", err);
        }
        GeneratedValue::new(value, &self.suffix)
    }
}

/// 5 + seed * 11
pub fn base_value(seed: f64) -> f64 {
    VALUE_MIN + seed * BASE_SPAN
}

/// Clamp into [VALUE_MIN, VALUE_MAX], reporting what was recovered
///
/// Non-finite input counts as below the lower bound.
pub fn clamp_value(raw: f64) -> (f64, Option<SignalError>) {
    if !raw.is_finite() {
        return (VALUE_MIN, Some(SignalError::NonFiniteValue { raw }));
    }
    if raw < VALUE_MIN {
        return (VALUE_MIN, Some(SignalError::OutOfRangeValue { raw, clamped: VALUE_MIN }));
    }
    if raw > VALUE_MAX {
        return (VALUE_MAX, Some(SignalError::OutOfRangeValue { raw, clamped: VALUE_MAX }));
    }
    (raw, None)
}

// =============================================================================
// TESTS
// =============================================================================
