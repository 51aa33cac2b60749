//! Scene composition: result + reveal count + board mapping + viewport → drawable primitives.
//!
//! A [`Scene`] is rebuilt from scratch on every render pass. Board primitives are expressed in
//! stage space and share one view transform; overlay primitives are drawn in untransformed
//! surface space (the progress readout stays readable at any zoom).

use crate::foundation::core::{Affine, Point, Rgba8, Size};
use crate::mapping::BoardMapping;
use crate::model::ArtResult;
use crate::viewport::Viewport;

/// Text shown when there is nothing to draw.
pub const PLACEHOLDER_TEXT: &str = "No data";

/// Horizontal anchoring of a text primitive relative to its origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// Origin is the left end of the baseline.
    Start,
    /// Origin is the middle of the baseline.
    Middle,
}

/// A single drawable item.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Stroked circle, optionally dashed (`[on, off]` lengths).
    Circle {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
        /// Stroke color.
        color: Rgba8,
        /// Stroke width.
        width: f64,
        /// Dash pattern, `None` for a solid stroke.
        dash: Option<[f64; 2]>,
    },
    /// Straight stroked segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke color (alpha carries the segment opacity).
        color: Rgba8,
        /// Stroke width.
        width: f64,
    },
    /// Single line of text.
    Text {
        /// Baseline origin.
        origin: Point,
        /// Contents.
        text: String,
        /// Font size in pixels.
        size: f64,
        /// Fill color.
        color: Rgba8,
        /// Horizontal anchoring.
        anchor: TextAnchor,
    },
}

/// Shortest accepted "on" length of a dash pattern, in stage pixels.
pub const MIN_DASH_LENGTH: f64 = 0.5;

/// Visual parameters of the board.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Style {
    /// Surface clear color.
    pub background: Rgba8,
    /// Nail marker radius in stage pixels.
    pub nail_radius: f64,
    /// Nail marker stroke width.
    pub nail_width: f64,
    /// Nail marker color.
    pub nail_color: Rgba8,
    /// Chord color before opacity is applied.
    pub segment_color: Rgba8,
    /// Chord opacity in `[0, 1]`.
    pub segment_opacity: f64,
    /// Chord stroke width.
    pub segment_width: f64,
    /// Nail index label size.
    pub label_size: f64,
    /// Nail index label color.
    pub label_color: Rgba8,
    /// Board boundary color.
    pub boundary_color: Rgba8,
    /// Board boundary dash pattern.
    pub boundary_dash: [f64; 2],
    /// Progress readout size.
    pub hud_size: f64,
    /// Progress readout color.
    pub hud_color: Rgba8,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background: Rgba8::opaque(255, 255, 255),
            nail_radius: 3.0,
            nail_width: 1.0,
            nail_color: Rgba8::opaque(220, 40, 40),
            segment_color: Rgba8::opaque(0, 0, 0),
            segment_opacity: 0.3,
            segment_width: 0.5,
            label_size: 8.0,
            label_color: Rgba8::opaque(60, 60, 60),
            boundary_color: Rgba8::opaque(150, 150, 150),
            boundary_dash: [6.0, 4.0],
            hud_size: 14.0,
            hud_color: Rgba8::opaque(30, 30, 30),
        }
    }
}

/// Render toggles plus style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneOptions {
    /// Draw nail markers.
    pub show_nails: bool,
    /// Draw nail index labels.
    pub show_labels: bool,
    /// Draw the dashed board boundary.
    pub show_boundary: bool,
    /// Visual parameters.
    pub style: Style,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            show_nails: true,
            show_labels: false,
            show_boundary: true,
            style: Style::default(),
        }
    }
}

impl SceneOptions {
    /// Return options with nail markers on or off.
    pub fn with_nails(mut self, on: bool) -> Self {
        self.show_nails = on;
        self
    }

    /// Return options with nail index labels on or off.
    pub fn with_labels(mut self, on: bool) -> Self {
        self.show_labels = on;
        self
    }

    /// Return options with the board boundary on or off.
    pub fn with_boundary(mut self, on: bool) -> Self {
        self.show_boundary = on;
        self
    }

    /// Return options with a different style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

/// Counters collected while building a scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Nail markers emitted.
    pub nails_drawn: usize,
    /// Consecutive path pairs inspected.
    pub segments_considered: usize,
    /// Chords emitted.
    pub segments_drawn: usize,
    /// Pairs dropped because an endpoint was out of range.
    pub segments_skipped: usize,
}

/// A fully composed frame, ready for any [`crate::render::SceneBackend`].
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Surface size in pixels.
    pub size: Size,
    /// Clear color.
    pub background: Rgba8,
    /// Stage → view transform applied to every board primitive.
    pub view: Affine,
    /// Board primitives in stage space, in paint order.
    pub board: Vec<Primitive>,
    /// Surface-space primitives painted last.
    pub overlay: Vec<Primitive>,
    /// Build counters.
    pub stats: SceneStats,
    /// `true` when the scene is the empty-data placeholder.
    pub placeholder: bool,
}

impl Scene {
    /// The "no data" scene: a single centered message, nothing else.
    pub fn placeholder(size: Size, style: &Style) -> Self {
        Self {
            size,
            background: style.background,
            view: Affine::IDENTITY,
            board: Vec::new(),
            overlay: vec![Primitive::Text {
                origin: Point::new(size.width / 2.0, size.height / 2.0),
                text: PLACEHOLDER_TEXT.to_string(),
                size: style.hud_size,
                color: style.hud_color,
                anchor: TextAnchor::Middle,
            }],
            stats: SceneStats::default(),
            placeholder: true,
        }
    }

    /// Chords in the board layer.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.board.iter().filter_map(|p| match p {
            Primitive::Line { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
    }

    /// All text contents, board first then overlay.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.board
            .iter()
            .chain(self.overlay.iter())
            .filter_map(|p| match p {
                Primitive::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
    }
}

/// Progress readout text for `reveal` of `len`.
pub fn progress_label(reveal: usize, len: usize) -> String {
    format!("{reveal} / {len}")
}

/// Compose one frame.
///
/// `result == None` or an empty result yields [`Scene::placeholder`] without touching the path.
#[tracing::instrument(level = "trace", skip(result, mapping, viewport, opts))]
pub fn build_scene(
    result: Option<&ArtResult>,
    reveal: usize,
    mapping: &BoardMapping,
    viewport: &Viewport,
    opts: &SceneOptions,
) -> Scene {
    let style = &opts.style;
    let Some(result) = result.filter(|r| !r.is_empty()) else {
        return Scene::placeholder(mapping.stage(), style);
    };

    let reveal = reveal.min(result.path_len());
    let points: Vec<Point> = result.nails.iter().map(|&n| mapping.map(n)).collect();
    let mut board = Vec::new();
    let mut stats = SceneStats {
        segments_considered: reveal.saturating_sub(1),
        ..SceneStats::default()
    };

    if opts.show_boundary {
        board.push(Primitive::Circle {
            center: mapping.board_center(),
            radius: mapping.board_radius(),
            color: style.boundary_color,
            width: 1.0,
            dash: Some(style.boundary_dash),
        });
    }

    let segment_color = style.segment_color.with_opacity(style.segment_opacity);
    for seg in result.segments(reveal) {
        board.push(Primitive::Line {
            from: points[seg.from],
            to: points[seg.to],
            color: segment_color,
            width: style.segment_width,
        });
        stats.segments_drawn += 1;
    }
    stats.segments_skipped = stats.segments_considered - stats.segments_drawn;

    if opts.show_nails {
        for &center in &points {
            board.push(Primitive::Circle {
                center,
                radius: style.nail_radius,
                color: style.nail_color,
                width: style.nail_width,
                dash: None,
            });
        }
        stats.nails_drawn = points.len();
    }

    if opts.show_labels {
        let d = style.nail_radius + 2.0;
        for (i, p) in points.iter().enumerate() {
            board.push(Primitive::Text {
                origin: Point::new(p.x + d, p.y - d),
                text: i.to_string(),
                size: style.label_size,
                color: style.label_color,
                anchor: TextAnchor::Start,
            });
        }
    }

    let overlay = vec![Primitive::Text {
        origin: Point::new(10.0, 10.0 + style.hud_size),
        text: progress_label(reveal, result.path_len()),
        size: style.hud_size,
        color: style.hud_color,
        anchor: TextAnchor::Start,
    }];

    if stats.segments_skipped > 0 {
        tracing::trace!(skipped = stats.segments_skipped, "out-of-range chords skipped");
    }

    Scene {
        size: mapping.stage(),
        background: style.background,
        view: viewport.transform(),
        board,
        overlay,
        stats,
        placeholder: false,
    }
}

#[cfg(test)]
#[path = "../tests/unit/scene/scene.rs"]
mod tests;
