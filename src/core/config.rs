//! Runtime settings: defaults, JSON file, validation

use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::{ANALYZING_MIN_MS, ANALYZING_MAX_MS, TICK_MS, UNIT_SUFFIX};
use crate::types::ConfigError;

/// Tunable timing and display settings
///
/// Bounds, offsets, and the schedule are fixed; only pacing and the unit
/// marker can change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Shortest analyzing delay (ms)
    pub analyzing_min_ms: u64,
    /// Longest analyzing delay (ms)
    pub analyzing_max_ms: u64,
    /// Countdown tick period (ms)
    pub tick_ms: u64,
    /// Marker after each value
    pub unit_suffix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            analyzing_min_ms: ANALYZING_MIN_MS,
            analyzing_max_ms: ANALYZING_MAX_MS,
            tick_ms: TICK_MS,
            unit_suffix: UNIT_SUFFIX.to_string(),
        }
    }
}

impl Settings {
    /// Load from a JSON file; missing fields take defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings: Settings = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analyzing_min_ms > self.analyzing_max_ms {
            return Err(ConfigError::Invalid {
                message: format!(
                    "analyzing_min_ms ({}) exceeds analyzing_max_ms ({})",
                    self.analyzing_min_ms, self.analyzing_max_ms
                ),
            });
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::Invalid {
                message: "tick_ms must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Inclusive range the analyzing delay is drawn from (ms)
    pub fn analyzing_range_ms(&self) -> RangeInclusive<u64> {
        self.analyzing_min_ms..=self.analyzing_max_ms
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
