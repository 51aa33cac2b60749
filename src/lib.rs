//! Threadline plays back string-art results: nails on a board joined by an ordered sequence of
//! chords, revealed progressively over a pannable, zoomable stage.
//!
//! # Pipeline overview
//!
//! 1. **Load**: a JSON payload becomes an [`ArtResult`] (nails + path of nail indices).
//! 2. **Play**: a [`Playback`] controller advances the reveal count on ticks from a [`TickSource`].
//! 3. **Compose**: [`build_scene`] maps nails through the [`BoardMapping`], applies the
//!    [`Viewport`] transform and emits drawable [`Primitive`]s.
//! 4. **Draw**: a [`SceneBackend`] (CPU raster or SVG) turns the [`Scene`] into output.
//!
//! [`Visualizer`] wires the four steps together behind a single event-driven component.
//!
//! Everything is single-threaded and cooperative: ticks only fire when the owner polls, and
//! cancelling a tick takes effect immediately.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod config;
pub mod crop;
pub mod mapping;
pub mod model;
pub mod playback;
pub mod render;
pub mod scene;
pub mod schedule;
pub mod viewport;
pub mod visualizer;

pub use crate::foundation::core::{Affine, Point, Rgba8, Size, Vec2};
pub use crate::foundation::error::{ThreadlineError, ThreadlineResult};

pub use crate::config::VisualizerConfig;
pub use crate::crop::{CropBox, crop_square};
pub use crate::mapping::BoardMapping;
pub use crate::model::{ArtResult, Nail, Segment};
pub use crate::playback::{Playback, PlaybackState, Transition};
pub use crate::render::{CpuBackend, CpuBackendOpts, FrameRGBA, SceneBackend, SvgBackend};
pub use crate::scene::{Primitive, Scene, SceneOptions, SceneStats, Style, TextAnchor, build_scene};
pub use crate::schedule::{FrameClock, IntervalClock, TaskHandle, TickSource};
pub use crate::viewport::{DragInput, ScaleBounds, Viewport, WheelInput};
pub use crate::visualizer::{UiEvent, Visualizer};
