//! Drawing surfaces for composed scenes.

/// Backend trait and frame type.
pub mod backend;
/// `vello_cpu` raster backend.
pub mod cpu;
/// SVG document backend.
pub mod svg;
pub(crate) mod text;

pub use backend::{FrameRGBA, SceneBackend};
pub use cpu::{CpuBackend, CpuBackendOpts};
pub use svg::SvgBackend;
