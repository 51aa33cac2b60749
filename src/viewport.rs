//! Pan/zoom state of the stage, driven by pointer wheel and drag input.

use crate::foundation::core::{Affine, Point, Vec2};
use crate::foundation::error::{ThreadlineError, ThreadlineResult};

/// Scale multiplier applied per wheel notch.
pub const DEFAULT_ZOOM_FACTOR: f64 = 1.1;

/// Inclusive zoom range.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScaleBounds {
    /// Smallest scale.
    pub min: f64,
    /// Largest scale.
    pub max: f64,
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self { min: 0.1, max: 3.0 }
    }
}

impl ScaleBounds {
    /// Create validated bounds with `0 < min <= max`.
    pub fn new(min: f64, max: f64) -> ThreadlineResult<Self> {
        let b = Self { min, max };
        b.validate()?;
        Ok(b)
    }

    /// Check `0 < min <= max`, both finite.
    pub fn validate(&self) -> ThreadlineResult<()> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min <= 0.0 || self.min > self.max
        {
            return Err(ThreadlineError::validation(format!(
                "scale bounds must satisfy 0 < min <= max (got [{}, {}])",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// Clamp `scale` into the bounds.
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}

/// Wheel gesture: pointer position in view space plus vertical wheel delta.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelInput {
    /// Pointer x in view (surface) pixels.
    pub pointer_x: f64,
    /// Pointer y in view (surface) pixels.
    pub pointer_y: f64,
    /// Wheel delta; negative zooms in, positive zooms out.
    pub delta_y: f64,
}

/// Drag gesture delta in view pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragInput {
    /// Horizontal movement.
    pub delta_x: f64,
    /// Vertical movement.
    pub delta_y: f64,
}

/// Uniform scale + translation applied to the whole board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    scale: f64,
    offset: Vec2,
    bounds: ScaleBounds,
    zoom_factor: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
            bounds: ScaleBounds::default(),
            zoom_factor: DEFAULT_ZOOM_FACTOR,
        }
    }
}

impl Viewport {
    /// Create an identity viewport with the given zoom range and per-notch factor (`> 1`).
    pub fn new(bounds: ScaleBounds, zoom_factor: f64) -> ThreadlineResult<Self> {
        bounds.validate()?;
        if !zoom_factor.is_finite() || zoom_factor <= 1.0 {
            return Err(ThreadlineError::validation(format!(
                "zoom factor must be finite and > 1 (got {zoom_factor})"
            )));
        }
        Ok(Self {
            scale: bounds.clamp(1.0),
            offset: Vec2::ZERO,
            bounds,
            zoom_factor,
        })
    }

    /// Current scale.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current translation in view pixels.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Configured zoom range.
    pub fn bounds(&self) -> ScaleBounds {
        self.bounds
    }

    /// Stage → view transform: `translate(offset) * scale(scale)`.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Map a view-space point back into stage space.
    pub fn view_to_stage(&self, p: Point) -> Point {
        ((p.to_vec2() - self.offset) / self.scale).to_point()
    }

    /// Map a stage-space point into view space.
    pub fn stage_to_view(&self, p: Point) -> Point {
        (p.to_vec2() * self.scale + self.offset).to_point()
    }

    /// Zoom one notch around the pointer so the stage point under it stays put.
    ///
    /// Returns `true` when the viewport changed.
    pub fn zoom_at(&mut self, input: WheelInput) -> bool {
        if !input.delta_y.is_finite() || input.delta_y == 0.0 {
            return false;
        }
        let next = if input.delta_y < 0.0 {
            self.scale * self.zoom_factor
        } else {
            self.scale / self.zoom_factor
        };
        self.set_scale_at(next, Point::new(input.pointer_x, input.pointer_y))
    }

    /// Set the scale (clamped) keeping the stage point under `anchor` fixed.
    ///
    /// Returns `true` when the viewport changed.
    pub fn set_scale_at(&mut self, scale: f64, anchor: Point) -> bool {
        if !scale.is_finite() || !anchor.x.is_finite() || !anchor.y.is_finite() {
            return false;
        }
        let next = self.bounds.clamp(scale);
        if next == self.scale {
            return false;
        }
        let under = self.view_to_stage(anchor);
        self.scale = next;
        self.offset = anchor.to_vec2() - under.to_vec2() * next;
        tracing::trace!(scale = next, offset = ?self.offset, "zoom");
        true
    }

    /// Translate by a drag delta. Panning is unbounded.
    ///
    /// Returns `true` when the viewport changed.
    pub fn pan_by(&mut self, input: DragInput) -> bool {
        let d = Vec2::new(input.delta_x, input.delta_y);
        if !d.is_finite() || d == Vec2::ZERO {
            return false;
        }
        self.offset += d;
        true
    }

    /// Back to scale 1 (clamped) and no offset.
    pub fn reset(&mut self) {
        self.scale = self.bounds.clamp(1.0);
        self.offset = Vec2::ZERO;
    }
}

#[cfg(test)]
#[path = "../tests/unit/viewport/viewport.rs"]
mod tests;
