//! Core types for siglock

mod state;
mod signals;
mod output;
mod reason;

pub use state::{LockState, Phase};
pub use signals::{GeneratedValue, ScheduleEntry, BatchEntry, Batch};
pub use output::{SinkEvent, RequestOutcome, TickOutcome};
pub use reason::{SignalError, ConfigError};
