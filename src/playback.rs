//! Reveal-progress state machine.
//!
//! `Idle → Animating → (Paused | Completed) → Idle`. The controller is the only writer of the
//! reveal count and owns the tick source that drives it, so cancellation and teardown can never be
//! skipped by a caller.

use std::time::Duration;

use crate::schedule::{IntervalClock, TaskHandle, TickSource};

/// Smallest allowed reveal step per tick.
pub const MIN_STEP: usize = 1;
/// Largest allowed reveal step per tick.
pub const MAX_STEP: usize = 50;
/// Step used when none is configured.
pub const DEFAULT_STEP: usize = 1;

/// Playback state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaybackState {
    /// Nothing revealed, no tick armed.
    Idle,
    /// A tick is armed and advances the reveal count.
    Animating,
    /// Stopped mid-way; the reveal count is kept.
    Paused,
    /// The whole path is revealed.
    Completed,
}

/// Outcome of a playback operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The operation was applied.
    Changed {
        /// State before the operation.
        from: PlaybackState,
        /// State after the operation.
        to: PlaybackState,
    },
    /// The operation is not valid in the current state and had no effect.
    Ignored {
        /// State the controller stayed in.
        state: PlaybackState,
    },
}

impl Transition {
    /// `true` when the operation was applied.
    pub fn is_changed(self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

/// Clamp a requested step into `[MIN_STEP, MAX_STEP]`.
pub fn clamp_step(step: usize) -> usize {
    step.clamp(MIN_STEP, MAX_STEP)
}

/// Playback controller over a path of `len` entries.
pub struct Playback<S: TickSource = IntervalClock> {
    source: S,
    state: PlaybackState,
    reveal: usize,
    len: usize,
    step: usize,
    session_step: usize,
    task: Option<TaskHandle>,
}

impl<S: TickSource> Playback<S> {
    /// Create an idle controller for a path of `len` entries.
    pub fn new(len: usize, source: S) -> Self {
        Self {
            source,
            state: PlaybackState::Idle,
            reveal: 0,
            len,
            step: DEFAULT_STEP,
            session_step: DEFAULT_STEP,
            task: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Number of revealed path entries, in `[0, len]`.
    pub fn reveal(&self) -> usize {
        self.reveal
    }

    /// Path length this controller animates over.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` for an empty path.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fraction revealed in `[0, 1]`; `0.0` for an empty path.
    pub fn progress(&self) -> f64 {
        if self.len == 0 {
            return 0.0;
        }
        self.reveal as f64 / self.len as f64
    }

    /// Configured step for the next session.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Configure the step for the next `start`/`resume`; a running session keeps its own step.
    ///
    /// Returns the clamped value actually stored.
    pub fn set_step(&mut self, step: usize) -> usize {
        self.step = clamp_step(step);
        self.step
    }

    /// Currently armed tick, if any.
    pub fn pending_tick(&self) -> Option<TaskHandle> {
        self.task
    }

    /// The owned tick source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Replace the path length (a new result was loaded). Always lands in `Idle`.
    pub fn load(&mut self, len: usize) -> Transition {
        let t = self.reset();
        self.len = len;
        t
    }

    /// Start over from zero. Valid from `Idle`, `Paused` and `Completed`.
    pub fn start(&mut self) -> Transition {
        if self.state == PlaybackState::Animating {
            return self.ignored("start");
        }
        let from = self.state;
        self.cancel_task();
        self.reveal = 0;
        self.begin_session(from)
    }

    /// Stop advancing, keeping the reveal count. Valid only while animating.
    pub fn pause(&mut self) -> Transition {
        if self.state != PlaybackState::Animating {
            return self.ignored("pause");
        }
        self.cancel_task();
        self.enter(PlaybackState::Paused)
    }

    /// Continue from the current reveal count. Valid only while paused.
    pub fn resume(&mut self) -> Transition {
        if self.state != PlaybackState::Paused {
            return self.ignored("resume");
        }
        self.begin_session(PlaybackState::Paused)
    }

    /// Reveal the whole path. Valid from any state.
    pub fn show_all(&mut self) -> Transition {
        self.cancel_task();
        self.reveal = self.len;
        self.enter(PlaybackState::Completed)
    }

    /// Hide everything. Valid from any state.
    pub fn reset(&mut self) -> Transition {
        self.cancel_task();
        self.reveal = 0;
        self.enter(PlaybackState::Idle)
    }

    /// Apply one firing of `handle`.
    ///
    /// Firings of a cancelled or replaced task, or any firing outside `Animating`, are no-ops.
    /// Returns `true` when the reveal count advanced.
    pub fn on_tick(&mut self, handle: TaskHandle) -> bool {
        if self.state != PlaybackState::Animating || self.task != Some(handle) {
            tracing::trace!(?handle, state = ?self.state, "stale tick ignored");
            return false;
        }
        self.reveal = self.reveal.saturating_add(self.session_step).min(self.len);
        tracing::trace!(reveal = self.reveal, len = self.len, "tick");
        if self.reveal == self.len {
            self.cancel_task();
            self.enter(PlaybackState::Completed);
        }
        true
    }

    /// Pump the tick source by `elapsed` and apply every firing in order.
    ///
    /// Returns the number of ticks that advanced the reveal count.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let fired = self.source.poll(elapsed);
        fired.into_iter().filter(|&h| self.on_tick(h)).count()
    }

    /// Release the armed tick regardless of state. Also performed on drop.
    ///
    /// A running session is left `Paused` with its reveal count, so `start` and `resume` stay
    /// valid afterwards.
    pub fn teardown(&mut self) {
        self.cancel_task();
        if self.state == PlaybackState::Animating {
            self.enter(PlaybackState::Paused);
        }
    }

    fn begin_session(&mut self, from: PlaybackState) -> Transition {
        self.session_step = self.step;
        if self.reveal >= self.len {
            self.reveal = self.len;
            self.state = PlaybackState::Completed;
        } else {
            self.task = Some(self.source.arm());
            self.state = PlaybackState::Animating;
        }
        tracing::debug!(
            ?from,
            to = ?self.state,
            reveal = self.reveal,
            step = self.session_step,
            "playback session"
        );
        Transition::Changed {
            from,
            to: self.state,
        }
    }

    fn enter(&mut self, to: PlaybackState) -> Transition {
        let from = self.state;
        self.state = to;
        tracing::debug!(?from, ?to, reveal = self.reveal, "playback transition");
        Transition::Changed { from, to }
    }

    fn ignored(&self, op: &'static str) -> Transition {
        tracing::debug!(op, state = ?self.state, "playback operation ignored");
        Transition::Ignored { state: self.state }
    }

    fn cancel_task(&mut self) {
        if let Some(h) = self.task.take() {
            self.source.cancel(h);
        }
    }
}

impl<S: TickSource> Drop for Playback<S> {
    fn drop(&mut self) {
        self.cancel_task();
    }
}

#[cfg(test)]
#[path = "../tests/unit/playback/playback.rs"]
mod tests;
