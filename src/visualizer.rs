//! The visualizer component: one owner for result, playback, viewport and toggles.
//!
//! Each piece of mutable state has exactly one writer: the playback controller for the reveal
//! count, the viewport for pan/zoom, [`Visualizer::handle`] for toggles. Any change raises the
//! redraw flag; [`Visualizer::render`] composes a fresh scene and clears it.

use std::time::Duration;

use crate::config::VisualizerConfig;
use crate::foundation::error::ThreadlineResult;
use crate::mapping::BoardMapping;
use crate::model::ArtResult;
use crate::playback::{Playback, PlaybackState};
use crate::scene::{Scene, SceneOptions, build_scene};
use crate::schedule::{IntervalClock, TickSource};
use crate::viewport::{DragInput, Viewport, WheelInput};

/// User-facing controls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UiEvent {
    /// Start the animation from zero.
    Start,
    /// Pause the running animation.
    Pause,
    /// Continue a paused animation.
    Resume,
    /// Hide everything and stop.
    Reset,
    /// Reveal the whole path at once.
    ShowAll,
    /// Set the reveal step for the next start/resume.
    SetStep(usize),
    /// Toggle nail markers.
    ToggleNails,
    /// Toggle nail index labels.
    ToggleLabels,
    /// Toggle the board boundary.
    ToggleBoundary,
    /// Pointer wheel: zoom around the pointer.
    Wheel(WheelInput),
    /// Pointer drag: pan.
    Drag(DragInput),
    /// Restore the identity view.
    ResetView,
}

/// Headless string-art visualizer.
pub struct Visualizer<S: TickSource = IntervalClock> {
    result: Option<ArtResult>,
    playback: Playback<S>,
    viewport: Viewport,
    mapping: BoardMapping,
    options: SceneOptions,
    dirty: bool,
}

impl Visualizer<IntervalClock> {
    /// Build a timer-driven visualizer from a validated config.
    pub fn from_config(cfg: &VisualizerConfig) -> ThreadlineResult<Self> {
        let clock = cfg.clock()?;
        Self::with_config(cfg, clock)
    }
}

impl<S: TickSource> Visualizer<S> {
    /// Create an empty visualizer (placeholder until [`Visualizer::load`]).
    pub fn new(source: S, mapping: BoardMapping, viewport: Viewport, options: SceneOptions) -> Self {
        Self {
            result: None,
            playback: Playback::new(0, source),
            viewport,
            mapping,
            options,
            dirty: true,
        }
    }

    /// Create an empty visualizer from a config and an explicit tick source.
    pub fn with_config(cfg: &VisualizerConfig, source: S) -> ThreadlineResult<Self> {
        cfg.validate()?;
        let mut v = Self::new(source, cfg.mapping()?, cfg.viewport()?, cfg.scene_options());
        v.playback.set_step(cfg.step);
        Ok(v)
    }

    /// Replace the current result wholesale. Playback returns to `Idle`; the view is kept.
    pub fn load(&mut self, result: ArtResult) {
        let invalid = result.invalid_indices();
        if invalid > 0 {
            tracing::warn!(
                invalid,
                path_len = result.path_len(),
                nails = result.nails.len(),
                "path contains out-of-range nail indices; affected chords will be skipped"
            );
        }
        let len = if result.is_empty() {
            0
        } else {
            result.path_len()
        };
        tracing::debug!(nails = result.nails.len(), path_len = len, "result loaded");
        self.playback.load(len);
        self.result = Some(result);
        self.dirty = true;
    }

    /// Drop the current result (placeholder state).
    pub fn clear(&mut self) {
        self.playback.load(0);
        self.result = None;
        self.dirty = true;
    }

    /// Apply one user control. Returns `true` when anything visible changed.
    pub fn handle(&mut self, event: UiEvent) -> bool {
        let before = self.playback.reveal();
        let changed = match event {
            UiEvent::Start => self.playback.start().is_changed(),
            UiEvent::Pause => self.playback.pause().is_changed(),
            UiEvent::Resume => self.playback.resume().is_changed(),
            UiEvent::Reset => self.playback.reset().is_changed(),
            UiEvent::ShowAll => self.playback.show_all().is_changed(),
            UiEvent::SetStep(step) => {
                self.playback.set_step(step);
                false
            }
            UiEvent::ToggleNails => {
                self.options.show_nails = !self.options.show_nails;
                true
            }
            UiEvent::ToggleLabels => {
                self.options.show_labels = !self.options.show_labels;
                true
            }
            UiEvent::ToggleBoundary => {
                self.options.show_boundary = !self.options.show_boundary;
                true
            }
            UiEvent::Wheel(input) => self.viewport.zoom_at(input),
            UiEvent::Drag(input) => self.viewport.pan_by(input),
            UiEvent::ResetView => {
                let prev = self.viewport;
                self.viewport.reset();
                prev != self.viewport
            }
        };
        let changed = changed || before != self.playback.reveal();
        self.dirty |= changed;
        changed
    }

    /// Pump the tick source by `elapsed`. Returns the number of ticks applied.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let applied = self.playback.advance(elapsed);
        if applied > 0 {
            self.dirty = true;
        }
        applied
    }

    /// `true` when reveal, view or toggles changed since the last [`Visualizer::render`].
    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// Compose the current frame and clear the redraw flag.
    pub fn render(&mut self) -> Scene {
        self.dirty = false;
        self.snapshot()
    }

    /// Compose the current frame without touching the redraw flag.
    pub fn snapshot(&self) -> Scene {
        build_scene(
            self.result.as_ref(),
            self.playback.reveal(),
            &self.mapping,
            &self.viewport,
            &self.options,
        )
    }

    /// Loaded result, if any.
    pub fn result(&self) -> Option<&ArtResult> {
        self.result.as_ref()
    }

    /// Playback controller (read-only; drive it through [`Visualizer::handle`]).
    pub fn playback(&self) -> &Playback<S> {
        &self.playback
    }

    /// Playback state shortcut.
    pub fn state(&self) -> PlaybackState {
        self.playback.state()
    }

    /// Reveal count shortcut.
    pub fn reveal(&self) -> usize {
        self.playback.reveal()
    }

    /// Current viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Current toggles and style.
    pub fn options(&self) -> &SceneOptions {
        &self.options
    }

    /// Board mapping.
    pub fn mapping(&self) -> &BoardMapping {
        &self.mapping
    }

    /// Release the armed tick, pausing a running session. Dropping the visualizer also cancels.
    pub fn teardown(&mut self) {
        let before = self.playback.state();
        self.playback.teardown();
        self.dirty |= before != self.playback.state();
    }
}

#[cfg(test)]
#[path = "../tests/unit/visualizer/visualizer.rs"]
mod tests;
