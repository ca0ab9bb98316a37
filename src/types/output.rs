//! Outputs of the core: display events and operation outcomes

use serde::{Deserialize, Serialize};
use std::time::Duration;
use crate::types::SignalError;

/// One call made on a DisplaySink, recorded or streamed as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SinkEvent {
    /// All slots back to "PENDING"
    Placeholder,
    /// Slots show "--", lock line shows "Analyzing signals..."
    Analyzing,
    /// One slot populated
    Entry {
        index: usize,
        value: String,
        time: String,
    },
    /// Lock line text
    LockText { text: String },
    /// Request control enabled/disabled
    RequestEnabled { enabled: bool },
}

/// Result of `request_generation`
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    /// Analyzing phase started; batch lands after `delay`
    Accepted { delay: Duration },
    /// Nothing happened
    Ignored(SignalError),
}

impl RequestOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, RequestOutcome::Accepted { .. })
    }
}

/// Result of one countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still locked with this many seconds left
    Remaining(u32),
    /// Countdown hit zero, now unlocked
    Expired,
    /// Tick arrived while unlocked; ignored
    Idle,
}
