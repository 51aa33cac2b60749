//! Logical board space → stage pixel space.

use crate::foundation::core::{Point, Size, Vec2, validate_size};
use crate::foundation::error::ThreadlineResult;
use crate::model::Nail;

/// Reference logical board edge length used by the transformation service.
pub const DEFAULT_BOARD_SIZE: f64 = 300.0;
/// Reference stage edge length in pixels.
pub const DEFAULT_STAGE_SIZE: f64 = 600.0;

/// Linear per-axis scale from the logical board to the stage, independent of pan/zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardMapping {
    logical: Size,
    stage: Size,
}

impl Default for BoardMapping {
    fn default() -> Self {
        Self {
            logical: Size::new(DEFAULT_BOARD_SIZE, DEFAULT_BOARD_SIZE),
            stage: Size::new(DEFAULT_STAGE_SIZE, DEFAULT_STAGE_SIZE),
        }
    }
}

impl BoardMapping {
    /// Create a validated mapping; both sizes must be finite and positive.
    pub fn new(logical: Size, stage: Size) -> ThreadlineResult<Self> {
        validate_size(logical, "logical board size")?;
        validate_size(stage, "stage size")?;
        Ok(Self { logical, stage })
    }

    /// Logical board size.
    pub fn logical(&self) -> Size {
        self.logical
    }

    /// Stage size in pixels.
    pub fn stage(&self) -> Size {
        self.stage
    }

    /// Per-axis scale factors `stage / logical`.
    pub fn factors(&self) -> Vec2 {
        Vec2::new(
            self.stage.width / self.logical.width,
            self.stage.height / self.logical.height,
        )
    }

    /// Map a nail into stage coordinates.
    pub fn map(&self, nail: Nail) -> Point {
        let f = self.factors();
        Point::new(nail.x * f.x, nail.y * f.y)
    }

    /// Center of the logical board, in stage coordinates.
    pub fn board_center(&self) -> Point {
        self.map(Nail::new(self.logical.width / 2.0, self.logical.height / 2.0))
    }

    /// Radius of the circle inscribed in the board, in stage coordinates.
    ///
    /// Uses the smaller axis so the boundary stays inside non-square stages.
    pub fn board_radius(&self) -> f64 {
        let f = self.factors();
        (self.logical.width * f.x).min(self.logical.height * f.y) / 2.0
    }
}

#[cfg(test)]
#[path = "../tests/unit/mapping/mapping.rs"]
mod tests;
