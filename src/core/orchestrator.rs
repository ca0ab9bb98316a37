//! GenerationOrchestrator: request → Analyzing → publish → Locked → Unlocked
//!
//! Owns the task queue, the LockController, and the injected DisplaySink.
//! All work happens on the caller's thread when it advances time.

use std::ops::RangeInclusive;
use std::time::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};
use crate::{SCHEDULE_OFFSETS, LOCK_WINDOW_SECS, TEXT_UNLOCKED};
use crate::core::clock::{Clock, SystemClock};
use crate::core::config::Settings;
use crate::core::lock::LockController;
use crate::core::scheduler::{Task, TaskHandle, TaskQueue};
use crate::core::seed::seed_at;
use crate::core::sink::DisplaySink;
use crate::core::stamper::stamp_from;
use crate::core::synth::ValueSynthesizer;
use crate::types::{Batch, LockState, Phase, RequestOutcome, SignalError};

/// Coordinates one generation cycle at a time
#[derive(Debug)]
pub struct GenerationOrchestrator<S: DisplaySink, C: Clock = SystemClock, R: Rng = StdRng> {
    sink: S,
    clock: C,
    rng: R,
    synth: ValueSynthesizer,
    lock: LockController,
    queue: TaskQueue<Task>,
    /// One-shot end of the Analyzing phase, set while analyzing
    analyzing: Option<TaskHandle>,
    analyzing_range_ms: RangeInclusive<u64>,
    batches_published: u64,
}

impl<S: DisplaySink> GenerationOrchestrator<S> {
    /// System clock, entropy-seeded RNG, default settings
    pub fn with_defaults(sink: S) -> Self {
        Self::new(sink, SystemClock, StdRng::from_entropy(), &Settings::default())
    }
}

impl<S: DisplaySink, C: Clock, R: Rng> GenerationOrchestrator<S, C, R> {
    /// Build and put the sink into its initial pending state
    pub fn new(mut sink: S, clock: C, rng: R, settings: &Settings) -> Self {
        sink.set_placeholder();
        sink.set_lock_text(TEXT_UNLOCKED);
        sink.set_request_enabled(true);

        Self {
            sink,
            clock,
            rng,
            synth: ValueSynthesizer::with_suffix(&settings.unit_suffix),
            lock: LockController::with_tick_period(settings.tick_period()),
            queue: TaskQueue::new(),
            analyzing: None,
            analyzing_range_ms: settings.analyzing_range_ms(),
            batches_published: 0,
        }
    }

    /// Ask for a new batch
    ///
    /// Ignored without any sink output unless the phase is Idle.
    pub fn request_generation(&mut self) -> RequestOutcome {
        let phase = self.phase();
        if !phase.accepts_requests() {
            let err = SignalError::RedundantRequest { phase };
            debug!(code = err.code(), "{}", err);
            return RequestOutcome::Ignored(err);
        }

        let range = self.analyzing_range_ms.clone();
        let delay_ms = if range.is_empty() {
            *range.start()
        } else {
            self.rng.gen_range(range)
        };
        let delay = Duration::from_millis(delay_ms);

        self.sink.set_request_enabled(false);
        self.sink.set_analyzing();
        self.analyzing = Some(self.queue.schedule_once(delay, Task::FinishAnalyzing));

        info!(delay_ms = delay.as_millis() as u64, "generation accepted");
        RequestOutcome::Accepted { delay }
    }

    /// Run every task due within `by` from now
    pub fn advance(&mut self, by: Duration) -> usize {
        let target = self.queue.now() + by;
        self.advance_to(target)
    }

    /// Run every task due at or before `at` (time since construction)
    pub fn advance_to(&mut self, at: Duration) -> usize {
        let mut ran = 0;
        while let Some((handle, task)) = self.queue.pop_due(at) {
            self.dispatch(handle, task);
            ran += 1;
        }
        self.queue.settle(at);
        ran
    }

    /// Run until nothing is pending; returns the time reached
    pub fn run_until_idle(&mut self) -> Duration {
        while let Some(due) = self.queue.next_due() {
            self.advance_to(due);
        }
        self.queue.now()
    }

    fn dispatch(&mut self, handle: TaskHandle, task: Task) {
        match task {
            Task::FinishAnalyzing if self.analyzing == Some(handle) => {
                self.analyzing = None;
                self.publish();
            }
            Task::LockTick if self.lock.countdown() == Some(handle) => {
                self.lock.tick(&mut self.queue, &mut self.sink);
            }
            _ => trace!(?task, "stale task dropped"),
        }
    }

    /// Build the batch, hand it to the sink, start the cooldown
    fn publish(&mut self) {
        // One clock read: seed and stamps agree on "now"
        let now = self.clock.now();
        let seed = seed_at(now);
        let values = self.synth.synthesize(seed, &mut self.rng);
        let times = SCHEDULE_OFFSETS.map(|minutes| stamp_from(now, minutes));
        let batch = Batch::assemble(now, seed, values, times);

        for (index, entry) in batch.entries.iter().enumerate() {
            self.sink.set_entry(index, &entry.value.text, &entry.time.text);
        }
        self.batches_published += 1;
        info!(seed, generated_at = %batch.generated_at, "batch published");

        self.lock.start(LOCK_WINDOW_SECS, &mut self.queue, &mut self.sink);
    }

    /// Idle, Analyzing, or Locked
    pub fn phase(&self) -> Phase {
        if self.analyzing.is_some() {
            return Phase::Analyzing;
        }
        match self.lock.state() {
            LockState::Unlocked => Phase::Idle,
            LockState::Locked { remaining } => Phase::Locked { remaining },
        }
    }

    pub fn lock_state(&self) -> LockState {
        self.lock.state()
    }

    /// When the next task is due (time since construction)
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.next_due()
    }

    /// Virtual time since construction
    pub fn now(&self) -> Duration {
        self.queue.now()
    }

    pub fn batches_published(&self) -> u64 {
        self.batches_published
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::core::sink::RecordingSink;
    use crate::types::SinkEvent;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    type TestOrchestrator = GenerationOrchestrator<RecordingSink, FixedClock, StdRng>;

    fn orchestrator() -> TestOrchestrator {
        let clock = FixedClock(
            NaiveDate::from_ymd_opt(2024, 3, 9)
                .unwrap()
                .and_hms_opt(14, 0, 0)
                .unwrap(),
        );
        let mut o = GenerationOrchestrator::new(
            RecordingSink::new(),
            clock,
            StdRng::seed_from_u64(1),
            &Settings::default(),
        );
        o.sink_mut().take();
        o
    }

    #[test]
    fn test_construction_shows_pending() {
        let o = GenerationOrchestrator::new(
            RecordingSink::new(),
            SystemClock,
            StdRng::seed_from_u64(1),
            &Settings::default(),
        );
        assert_eq!(
            o.sink().events(),
            &[
                SinkEvent::Placeholder,
                SinkEvent::LockText { text: "Unlocked".into() },
                SinkEvent::RequestEnabled { enabled: true },
            ]
        );
        assert_eq!(o.phase(), Phase::Idle);
    }

    #[test]
    fn test_accepted_request_enters_analyzing() {
        let mut o = orchestrator();
        let outcome = o.request_generation();
        let RequestOutcome::Accepted { delay } = outcome.clone() else {
            panic!("expected accepted, got {:?}", outcome);
        };
        assert!(delay >= Duration::from_millis(3000) && delay <= Duration::from_millis(4200));
        assert_eq!(o.phase(), Phase::Analyzing);
        assert_eq!(
            o.sink().events(),
            &[SinkEvent::RequestEnabled { enabled: false }, SinkEvent::Analyzing]
        );
    }

    #[test]
    fn test_batch_lands_after_delay() {
        let mut o = orchestrator();
        let RequestOutcome::Accepted { delay } = o.request_generation() else {
            panic!("not accepted");
        };
        o.advance(delay - Duration::from_millis(1));
        assert_eq!(o.phase(), Phase::Analyzing);
        assert!(o.sink().entries().is_empty());

        o.advance(Duration::from_millis(1));
        assert_eq!(o.sink().entries().len(), 4);
        assert_eq!(o.phase(), Phase::Locked { remaining: 1800 });
        assert_eq!(o.batches_published(), 1);
    }

    #[test]
    fn test_request_during_analyzing_ignored() {
        let mut o = orchestrator();
        o.request_generation();
        let before = o.sink().events().len();

        let outcome = o.request_generation();
        assert_eq!(
            outcome,
            RequestOutcome::Ignored(SignalError::RedundantRequest { phase: Phase::Analyzing })
        );
        assert_eq!(o.sink().events().len(), before);
        assert!(o.next_deadline().is_some());
    }

    #[test]
    fn test_request_while_locked_ignored() {
        let mut o = orchestrator();
        o.request_generation();
        o.advance(Duration::from_millis(4200));
        o.advance(Duration::from_secs(10));
        let before = o.sink().events().to_vec();
        let lock_before = o.lock_state();

        assert!(!o.request_generation().is_accepted());
        assert_eq!(o.sink().events(), before.as_slice());
        assert_eq!(o.lock_state(), lock_before);
    }

    #[test]
    fn test_full_cycle_returns_to_idle() {
        let mut o = orchestrator();
        o.request_generation();
        let reached = o.run_until_idle();
        assert_eq!(o.phase(), Phase::Idle);
        assert!(reached >= Duration::from_secs(1803));
        assert!(reached <= Duration::from_millis(1_804_200));
        assert_eq!(o.sink().request_enabled(), Some(true));
        assert!(o.request_generation().is_accepted());
    }

    #[test]
    fn test_custom_timing() {
        let settings = Settings {
            analyzing_min_ms: 10,
            analyzing_max_ms: 10,
            tick_ms: 5,
            ..Settings::default()
        };
        let mut o = GenerationOrchestrator::new(
            RecordingSink::new(),
            SystemClock,
            StdRng::seed_from_u64(9),
            &settings,
        );
        assert_eq!(
            o.request_generation(),
            RequestOutcome::Accepted { delay: Duration::from_millis(10) }
        );
        // 10ms analyzing + 1800 ticks of 5ms
        o.advance(Duration::from_millis(10 + 1800 * 5));
        assert_eq!(o.phase(), Phase::Idle);
    }
}
