//! JSON-loadable visualizer configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;

use crate::foundation::core::{Size, validate_size};
use crate::foundation::error::{ThreadlineError, ThreadlineResult};
use crate::mapping::{BoardMapping, DEFAULT_BOARD_SIZE, DEFAULT_STAGE_SIZE};
use crate::playback::{DEFAULT_STEP, MAX_STEP, MIN_STEP};
use crate::scene::{MIN_DASH_LENGTH, SceneOptions, Style};
use crate::schedule::{DEFAULT_TICK_INTERVAL, IntervalClock};
use crate::viewport::{DEFAULT_ZOOM_FACTOR, ScaleBounds, Viewport};

/// Everything a [`crate::Visualizer`] needs besides the result itself.
///
/// Every field has a default, so a config file only lists what it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Logical board size the nail coordinates are expressed in.
    pub board_size: Size,
    /// Stage (surface) size in pixels.
    pub stage_size: Size,
    /// Reveal step per tick, `[1, 50]`.
    pub step: usize,
    /// Timer interval between ticks, in milliseconds.
    pub tick_interval_ms: u64,
    /// Zoom range.
    pub scale_bounds: ScaleBounds,
    /// Scale multiplier per wheel notch.
    pub zoom_factor: f64,
    /// Draw nail markers.
    pub show_nails: bool,
    /// Draw nail index labels.
    pub show_labels: bool,
    /// Draw the dashed board boundary.
    pub show_boundary: bool,
    /// Visual parameters.
    pub style: Style,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        let opts = SceneOptions::default();
        Self {
            board_size: Size::new(DEFAULT_BOARD_SIZE, DEFAULT_BOARD_SIZE),
            stage_size: Size::new(DEFAULT_STAGE_SIZE, DEFAULT_STAGE_SIZE),
            step: DEFAULT_STEP,
            tick_interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            scale_bounds: ScaleBounds::default(),
            zoom_factor: DEFAULT_ZOOM_FACTOR,
            show_nails: opts.show_nails,
            show_labels: opts.show_labels,
            show_boundary: opts.show_boundary,
            style: opts.style,
        }
    }
}

impl VisualizerConfig {
    /// Read and validate a JSON config file.
    pub fn from_path(path: &Path) -> ThreadlineResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_slice(&bytes)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations the components cannot be built from.
    pub fn validate(&self) -> ThreadlineResult<()> {
        validate_size(self.board_size, "board_size")?;
        validate_size(self.stage_size, "stage_size")?;
        if !(MIN_STEP..=MAX_STEP).contains(&self.step) {
            return Err(ThreadlineError::validation(format!(
                "step must be in [{MIN_STEP}, {MAX_STEP}] (got {})",
                self.step
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(ThreadlineError::validation("tick_interval_ms must be > 0"));
        }
        self.scale_bounds.validate()?;
        let s = &self.style;
        let opacity_ok = (0.0..=1.0).contains(&s.segment_opacity);
        let widths_ok = [s.nail_radius, s.nail_width, s.segment_width, s.label_size, s.hud_size]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0);
        if !opacity_ok || !widths_ok {
            return Err(ThreadlineError::validation(
                "style sizes must be finite and >= 0, segment_opacity in [0, 1]",
            ));
        }
        let [on, off] = s.boundary_dash;
        if !(on.is_finite() && off.is_finite() && on >= MIN_DASH_LENGTH && off >= 0.0) {
            return Err(ThreadlineError::validation(format!(
                "boundary_dash must be [on >= {MIN_DASH_LENGTH}, off >= 0], finite (got [{on}, {off}])"
            )));
        }
        Ok(())
    }

    /// Tick interval as a [`Duration`].
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Board mapping from the configured sizes.
    pub fn mapping(&self) -> ThreadlineResult<BoardMapping> {
        BoardMapping::new(self.board_size, self.stage_size)
    }

    /// Identity viewport with the configured zoom range.
    pub fn viewport(&self) -> ThreadlineResult<Viewport> {
        Viewport::new(self.scale_bounds, self.zoom_factor)
    }

    /// Timer tick source with the configured interval.
    pub fn clock(&self) -> ThreadlineResult<IntervalClock> {
        IntervalClock::new(self.tick_interval())
    }

    /// Scene toggles and style.
    pub fn scene_options(&self) -> SceneOptions {
        SceneOptions {
            show_nails: self.show_nails,
            show_labels: self.show_labels,
            show_boundary: self.show_boundary,
            style: self.style,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
