//! LockController: cooldown countdown gating new requests
//!
//! State transitions:
//! - any → LOCKED(n): start(n), replaces a running countdown
//! - LOCKED(n) → LOCKED(n-1): tick, n > 1
//! - LOCKED(1) → UNLOCKED: tick, sink reset to pending

use std::time::Duration;
use tracing::{debug, info, trace};
use crate::{TICK_MS, TEXT_UNLOCKED};
use crate::core::scheduler::{Task, TaskHandle, TaskQueue};
use crate::core::sink::DisplaySink;
use crate::types::{LockState, TickOutcome};

/// Countdown state machine; the only owner of LockState
#[derive(Debug)]
pub struct LockController {
    /// Current state
    state: LockState,
    /// Time between ticks
    tick_period: Duration,
    /// Repeating tick while locked
    countdown: Option<TaskHandle>,
    /// Number of `start` calls
    start_count: u64,
}

impl Default for LockController {
    fn default() -> Self {
        Self::new()
    }
}

impl LockController {
    pub fn new() -> Self {
        Self::with_tick_period(Duration::from_millis(TICK_MS))
    }

    /// Countdown that ticks every `tick_period` instead of every second
    pub fn with_tick_period(tick_period: Duration) -> Self {
        Self {
            state: LockState::Unlocked,
            tick_period,
            countdown: None,
            start_count: 0,
        }
    }

    /// Lock for `seconds` ticks, replacing any running countdown
    ///
    /// `seconds` below 1 is raised to 1.
    pub fn start<S: DisplaySink + ?Sized>(
        &mut self,
        seconds: u32,
        queue: &mut TaskQueue<Task>,
        sink: &mut S,
    ) -> LockState {
        let seconds = seconds.max(1);

        // Release the old handle before arming a new one
        if let Some(prev) = self.countdown.take() {
            queue.cancel(prev);
            debug!(replaced_remaining = self.state.remaining(), "countdown replaced");
        }

        self.state = LockState::Locked { remaining: seconds };
        self.start_count += 1;

        sink.set_request_enabled(false);
        sink.set_lock_text(&self.state.lock_text());

        self.countdown = Some(queue.schedule_repeating(self.tick_period, Task::LockTick));
        info!(seconds, "lock started");
        self.state
    }

    /// One countdown step
    pub fn tick<S: DisplaySink + ?Sized>(
        &mut self,
        queue: &mut TaskQueue<Task>,
        sink: &mut S,
    ) -> TickOutcome {
        match self.state {
            LockState::Unlocked => {
                trace!("tick while unlocked");
                TickOutcome::Idle
            }
            LockState::Locked { remaining } if remaining <= 1 => {
                if let Some(handle) = self.countdown.take() {
                    queue.cancel(handle);
                }
                self.state = LockState::Unlocked;

                sink.set_placeholder();
                sink.set_lock_text(TEXT_UNLOCKED);
                sink.set_request_enabled(true);

                info!("lock expired");
                TickOutcome::Expired
            }
            LockState::Locked { remaining } => {
                let remaining = remaining - 1;
                self.state = LockState::Locked { remaining };
                sink.set_lock_text(&self.state.lock_text());
                trace!(remaining, "tick");
                TickOutcome::Remaining(remaining)
            }
        }
    }

    /// Get current state
    pub fn state(&self) -> LockState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state.is_locked()
    }

    /// Handle of the running countdown, if any
    pub fn countdown(&self) -> Option<TaskHandle> {
        self.countdown
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    pub fn start_count(&self) -> u64 {
        self.start_count
    }
}

// =============================================================================
// TESTS
// =============================================================================
