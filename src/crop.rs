//! Square crop of an encoded bitmap: the step that prepares the image sent to the transformer.

use std::io::Cursor;

use anyhow::Context as _;

use crate::foundation::error::{ThreadlineError, ThreadlineResult};

/// Square crop region in source pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CropBox {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Edge length.
    pub size: u32,
}

impl CropBox {
    /// Largest square centered in a `width x height` image.
    pub fn centered(width: u32, height: u32) -> Self {
        let size = width.min(height);
        Self {
            x: (width - size) / 2,
            y: (height - size) / 2,
            size,
        }
    }

    /// Shrink and shift the box so it lies inside a `width x height` image.
    pub fn clamped_to(self, width: u32, height: u32) -> Self {
        let size = self.size.min(width).min(height);
        Self {
            x: self.x.min(width - size),
            y: self.y.min(height - size),
            size,
        }
    }
}

/// Decode `bytes`, cut `region` (clamped into the image) and re-encode as PNG.
pub fn crop_square(bytes: &[u8], region: CropBox) -> ThreadlineResult<Vec<u8>> {
    let img = image::load_from_memory(bytes).context("decode image")?;
    let (w, h) = (img.width(), img.height());
    if w == 0 || h == 0 {
        return Err(ThreadlineError::validation("image has no pixels"));
    }
    let region = region.clamped_to(w, h);
    if region.size == 0 {
        return Err(ThreadlineError::validation("crop size must be > 0"));
    }
    tracing::debug!(?region, width = w, height = h, "cropping");
    let cropped = img.crop_imm(region.x, region.y, region.size, region.size);
    let mut out = Vec::new();
    cropped
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(out)
}

#[cfg(test)]
#[path = "../tests/unit/crop/crop.rs"]
mod tests;
