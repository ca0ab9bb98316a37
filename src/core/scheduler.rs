//! Single pending-task queue on a virtual clock
//!
//! Everything runs on one logical thread. The queue holds one-shot and
//! repeating tasks keyed by due time; callers pull due tasks and dispatch
//! them. Time moves only when a task is popped or the caller settles it.

use std::time::Duration;

/// Work the orchestrator schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// End of the Analyzing delay (one-shot)
    FinishAnalyzing,
    /// One countdown second (repeating)
    LockTick,
}

/// Cancellable reference to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Pending<T> {
    handle: TaskHandle,
    due: Duration,
    /// Insertion order, breaks ties between equal due times
    order: u64,
    period: Option<Duration>,
    task: T,
}

/// Pending tasks ordered by due time, then insertion
#[derive(Debug)]
pub struct TaskQueue<T> {
    now: Duration,
    pending: Vec<Pending<T>>,
    next_handle: u64,
    next_order: u64,
}

impl<T: Clone> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> TaskQueue<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            pending: Vec::new(),
            next_handle: 0,
            next_order: 0,
        }
    }

    /// Virtual time elapsed since the queue was created
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `task` once, `delay` from now
    pub fn schedule_once(&mut self, delay: Duration, task: T) -> TaskHandle {
        self.insert(delay, None, task)
    }

    /// Run `task` every `period`, first time one period from now
    pub fn schedule_repeating(&mut self, period: Duration, task: T) -> TaskHandle {
        self.insert(period, Some(period), task)
    }

    /// Drop a pending task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Due time of the earliest pending task
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.due).min()
    }

    /// Pop the earliest task due at or before `until`
    ///
    /// The queue clock moves to the task's due time. A repeating task is
    /// re-armed one period later before it is returned, so the caller can
    /// still cancel it while handling this occurrence.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TaskHandle, T)> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.order))
            .map(|(i, _)| i)?;

        let mut entry = self.pending.swap_remove(idx);
        self.now = self.now.max(entry.due);
        let fired = (entry.handle, entry.task.clone());

        if let Some(period) = entry.period {
            entry.due += period;
            entry.order = self.bump_order();
            self.pending.push(entry);
        }
        Some(fired)
    }

    /// Move the clock forward with nothing dispatched
    ///
    /// Used after draining due tasks so `now` reaches the requested time.
    pub fn settle(&mut self, at: Duration) {
        self.now = self.now.max(at);
    }

    fn insert(&mut self, delay: Duration, period: Option<Duration>, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        let order = self.bump_order();
        self.pending.push(Pending {
            handle,
            due: self.now + delay,
            order,
            period,
            task,
        });
        handle
    }

    fn bump_order(&mut self) -> u64 {
        let order = self.next_order;
        self.next_order += 1;
        order
    }
}
