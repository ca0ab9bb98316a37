//! Integration tests for Slice 2
//!
//! Tests LockController driven through the task queue

use pretty_assertions::assert_eq;
use siglock::core::{LockController, RecordingSink, Task, TaskQueue};
use siglock::types::{LockState, SinkEvent, TickOutcome};
use std::time::Duration;

/// Drain the queue up to `until`, ticking the lock for each LockTick
fn run(lock: &mut LockController, queue: &mut TaskQueue<Task>, sink: &mut RecordingSink, until: Duration) -> usize {
    let mut ticks = 0;
    while let Some((handle, task)) = queue.pop_due(until) {
        assert_eq!(task, Task::LockTick);
        assert_eq!(lock.countdown(), Some(handle));
        lock.tick(queue, sink);
        ticks += 1;
    }
    ticks
}

/// 1800-second lock unlocks after exactly 1800 one-second ticks
#[test]
fn test_thirty_minute_lock() {
    let mut lock = LockController::new();
    let mut queue = TaskQueue::new();
    let mut sink = RecordingSink::new();

    lock.start(1800, &mut queue, &mut sink);

    assert_eq!(run(&mut lock, &mut queue, &mut sink, Duration::from_secs(1799)), 1799);
    assert_eq!(lock.state(), LockState::Locked { remaining: 1 });
    assert_eq!(sink.last_lock_text(), Some("Locked • next set 00:01"));

    assert_eq!(run(&mut lock, &mut queue, &mut sink, Duration::from_secs(1800)), 1);
    assert_eq!(lock.state(), LockState::Unlocked);
    assert!(queue.is_empty());

    // Nothing left to fire
    assert_eq!(run(&mut lock, &mut queue, &mut sink, Duration::from_secs(4000)), 0);
}

/// Restarting mid-countdown leaves exactly one ticking task
#[test]
fn test_restart_does_not_stack() {
    let mut lock = LockController::new();
    let mut queue = TaskQueue::new();
    let mut sink = RecordingSink::new();

    lock.start(10, &mut queue, &mut sink);
    run(&mut lock, &mut queue, &mut sink, Duration::from_millis(3500));
    queue.settle(Duration::from_millis(3500));
    assert_eq!(lock.state(), LockState::Locked { remaining: 7 });

    lock.start(3, &mut queue, &mut sink);
    assert_eq!(queue.len(), 1);

    // New countdown is relative to the restart (t=3.5s)
    assert_eq!(run(&mut lock, &mut queue, &mut sink, Duration::from_millis(6400)), 2);
    assert_eq!(lock.state(), LockState::Locked { remaining: 1 });
    assert_eq!(run(&mut lock, &mut queue, &mut sink, Duration::from_millis(6500)), 1);
    assert_eq!(lock.state(), LockState::Unlocked);
}

/// Countdown text follows every tick
#[test]
fn test_countdown_text_sequence() {
    let mut lock = LockController::new();
    let mut queue = TaskQueue::new();
    let mut sink = RecordingSink::new();

    lock.start(61, &mut queue, &mut sink);
    assert_eq!(lock.tick(&mut queue, &mut sink), TickOutcome::Remaining(60));
    assert_eq!(lock.tick(&mut queue, &mut sink), TickOutcome::Remaining(59));

    assert_eq!(
        sink.events(),
        &[
            SinkEvent::RequestEnabled { enabled: false },
            SinkEvent::LockText { text: "Locked • next set 01:01".into() },
            SinkEvent::LockText { text: "Locked • next set 01:00".into() },
            SinkEvent::LockText { text: "Locked • next set 00:59".into() },
        ]
    );
}
