//! Recovered anomalies and configuration errors
//!
//! Nothing in `SignalError` reaches a caller as a failure: each kind is
//! recovered where it occurs and only logged (or reported as an ignored
//! request outcome).

use thiserror::Error;
use crate::types::Phase;

/// Anomalies the core recovers from locally
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalError {
    /// Synthesized value was NaN or infinite; clamped to the lower bound
    #[error("non-finite value {raw}, clamped to lower bound")]
    NonFiniteValue { raw: f64 },

    /// Synthesized value fell outside [5.00, 16.00]; clamped
    #[error("value {raw} out of range, clamped to {clamped}")]
    OutOfRangeValue { raw: f64, clamped: f64 },

    /// request_generation while not idle; ignored
    #[error("request ignored while {phase}")]
    RedundantRequest { phase: Phase },
}

impl SignalError {
    /// Stable code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::NonFiniteValue { .. } => "NON_FINITE_VALUE",
            Self::OutOfRangeValue { .. } => "OUT_OF_RANGE_VALUE",
            Self::RedundantRequest { .. } => "REDUNDANT_REQUEST",
        }
    }
}

/// Errors loading or validating `Settings`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {message}")]
    Invalid { message: String },
}
