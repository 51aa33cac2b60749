//! Cancellable repeating task sources driving playback ticks.
//!
//! Everything here is cooperative and single-threaded: a source never fires on its own, the owner
//! pumps it with [`TickSource::poll`] and receives the firings in order. A source holds at most one
//! armed task; arming again replaces (and thereby cancels) the previous one.

use std::time::Duration;

use crate::foundation::error::{ThreadlineError, ThreadlineResult};

/// Default timer interval between playback ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Upper bound on firings returned by a single poll; longer stalls are coalesced.
const MAX_CATCH_UP: usize = 1024;

/// Identity of one armed repeating task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

/// A scheduler for a single cancellable repeating task.
pub trait TickSource {
    /// Arm a new repeating task, cancelling any task that is still armed.
    fn arm(&mut self) -> TaskHandle;

    /// Cancel `handle` if it is the armed task. Cancelling a stale handle is a no-op.
    fn cancel(&mut self, handle: TaskHandle);

    /// Currently armed task, if any.
    fn armed(&self) -> Option<TaskHandle>;

    /// Advance the source by `elapsed` and return the firings that became due, in order.
    fn poll(&mut self, elapsed: Duration) -> Vec<TaskHandle>;
}

#[derive(Clone, Copy, Debug, Default)]
struct HandleSeq(u64);

impl HandleSeq {
    fn next(&mut self) -> TaskHandle {
        self.0 += 1;
        TaskHandle(self.0)
    }
}

#[derive(Clone, Copy, Debug)]
struct ArmedTimer {
    handle: TaskHandle,
    until_next: Duration,
}

/// Timer-interval source: one firing every `interval` of elapsed time.
#[derive(Clone, Debug)]
pub struct IntervalClock {
    interval: Duration,
    seq: HandleSeq,
    armed: Option<ArmedTimer>,
}

impl Default for IntervalClock {
    fn default() -> Self {
        Self {
            interval: DEFAULT_TICK_INTERVAL,
            seq: HandleSeq::default(),
            armed: None,
        }
    }
}

impl IntervalClock {
    /// Create a clock firing every `interval`; zero intervals are rejected.
    pub fn new(interval: Duration) -> ThreadlineResult<Self> {
        if interval.is_zero() {
            return Err(ThreadlineError::validation("tick interval must be > 0"));
        }
        Ok(Self {
            interval,
            ..Self::default()
        })
    }

    /// Configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl TickSource for IntervalClock {
    fn arm(&mut self) -> TaskHandle {
        let handle = self.seq.next();
        self.armed = Some(ArmedTimer {
            handle,
            until_next: self.interval,
        });
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        if self.armed.is_some_and(|a| a.handle == handle) {
            self.armed = None;
        }
    }

    fn armed(&self) -> Option<TaskHandle> {
        self.armed.map(|a| a.handle)
    }

    fn poll(&mut self, elapsed: Duration) -> Vec<TaskHandle> {
        let Some(mut timer) = self.armed else {
            return Vec::new();
        };
        let mut fired = Vec::new();
        let mut remaining = elapsed;
        while remaining >= timer.until_next {
            remaining -= timer.until_next;
            timer.until_next = self.interval;
            if fired.len() == MAX_CATCH_UP {
                tracing::trace!(interval = ?self.interval, "coalescing overdue ticks");
                remaining = Duration::ZERO;
                break;
            }
            fired.push(timer.handle);
        }
        timer.until_next -= remaining;
        self.armed = Some(timer);
        fired
    }
}

/// Per-frame source: every poll fires the armed task exactly once, regardless of elapsed time.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    seq: HandleSeq,
    armed: Option<TaskHandle>,
}

impl FrameClock {
    /// Create an idle frame clock.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TickSource for FrameClock {
    fn arm(&mut self) -> TaskHandle {
        let handle = self.seq.next();
        self.armed = Some(handle);
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        if self.armed == Some(handle) {
            self.armed = None;
        }
    }

    fn armed(&self) -> Option<TaskHandle> {
        self.armed
    }

    fn poll(&mut self, _elapsed: Duration) -> Vec<TaskHandle> {
        self.armed.into_iter().collect()
    }
}

#[cfg(test)]
#[path = "../tests/unit/schedule/schedule.rs"]
mod tests;
