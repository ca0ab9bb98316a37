//! Lock and request-gate state definitions

use serde::{Deserialize, Serialize};
use crate::TEXT_UNLOCKED;

/// State owned by the LockController
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LockState {
    /// New batches may be requested
    Unlocked,
    /// Cooldown running, `remaining` ≥ 1 seconds left
    Locked { remaining: u32 },
}

impl LockState {
    pub fn is_locked(&self) -> bool {
        matches!(self, LockState::Locked { .. })
    }

    /// Seconds left on the countdown (0 when unlocked)
    pub fn remaining(&self) -> u32 {
        match self {
            LockState::Unlocked => 0,
            LockState::Locked { remaining } => *remaining,
        }
    }

    /// Text for the lock line: "Unlocked" or "Locked • next set MM:SS"
    pub fn lock_text(&self) -> String {
        match self {
            LockState::Unlocked => TEXT_UNLOCKED.to_string(),
            LockState::Locked { remaining } => {
                format!("Locked • next set {:02}:{:02}", remaining / 60, remaining % 60)
            }
        }
    }
}

impl std::fmt::Display for LockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LockState::Unlocked => write!(f, "UNLOCKED"),
            LockState::Locked { remaining } => write!(f, "LOCKED({})", remaining),
        }
    }
}

/// Whole-system phase as seen by a caller of `request_generation`
///
/// `Analyzing` is not part of LockState; the orchestrator tracks it, and it
/// gates requests exactly like `Locked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Ready for a request
    Idle,
    /// Request accepted, batch not yet published
    Analyzing,
    /// Batch published, cooldown running
    Locked { remaining: u32 },
}

impl Phase {
    /// Does this phase accept `request_generation`?
    pub fn accepts_requests(&self) -> bool {
        *self == Phase::Idle
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Phase::Idle => "🔓",
            Phase::Analyzing => "⏳",
            Phase::Locked { .. } => "🔒",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Idle => write!(f, "IDLE"),
            Phase::Analyzing => write!(f, "ANALYZING"),
            Phase::Locked { remaining } => write!(f, "LOCKED({})", remaining),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_text_formats_minutes_and_seconds() {
        assert_eq!(LockState::Locked { remaining: 1800 }.lock_text(), "Locked • next set 30:00");
        assert_eq!(LockState::Locked { remaining: 61 }.lock_text(), "Locked • next set 01:01");
        assert_eq!(LockState::Locked { remaining: 9 }.lock_text(), "Locked • next set 00:09");
        assert_eq!(LockState::Unlocked.lock_text(), "Unlocked");
    }

    #[test]
    fn test_only_idle_accepts_requests() {
        assert!(Phase::Idle.accepts_requests());
        assert!(!Phase::Analyzing.accepts_requests());
        assert!(!Phase::Locked { remaining: 5 }.accepts_requests());
    }
}
