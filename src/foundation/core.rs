use crate::foundation::error::{ThreadlineError, ThreadlineResult};

pub use kurbo::{Affine, Point, Size, Vec2};

/// Straight-alpha RGBA8 color used by scene primitives.
///
/// Backends convert to premultiplied form at the drawing boundary. The default is transparent
/// black.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Construct a color from straight-alpha channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Return the color with alpha multiplied by `opacity` (clamped to `[0, 1]`).
    pub fn with_opacity(self, opacity: f64) -> Self {
        let o = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            1.0
        };
        Self {
            a: (f64::from(self.a) * o).round() as u8,
            ..self
        }
    }

    /// CSS-style `#rrggbb` hex string (alpha is emitted separately by callers).
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a `[0, 1]` float.
    pub fn alpha_f64(self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

/// Reject sizes that cannot be used as a scale denominator or drawing surface.
pub(crate) fn validate_size(size: Size, what: &str) -> ThreadlineResult<()> {
    let ok = size.width.is_finite()
        && size.height.is_finite()
        && size.width > 0.0
        && size.height > 0.0;
    if !ok {
        return Err(ThreadlineError::validation(format!(
            "{what} must be finite and > 0 (got {}x{})",
            size.width, size.height
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
