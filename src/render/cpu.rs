use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Affine, Point, Rgba8};
use crate::foundation::error::{ThreadlineError, ThreadlineResult};
use crate::render::backend::{FrameRGBA, SceneBackend};
use crate::render::text::TextLayoutEngine;
use crate::scene::{Primitive, Scene, TextAnchor};

/// Polyline segments per pixel of arc length when flattening circles.
const CIRCLE_SEGMENTS_PER_PX: f64 = 0.5;

/// Dash patterns finer than this many dashes per circle are stroked solid.
const MAX_DASHES_PER_CIRCLE: f64 = 2048.0;

/// Options for the CPU backend.
#[derive(Clone, Debug, Default)]
pub struct CpuBackendOpts {
    pub(crate) font: Option<Vec<u8>>,
    pub(crate) clear_rgba: Option<[u8; 4]>,
}

impl CpuBackendOpts {
    /// Return options with font bytes used for labels and the progress readout.
    ///
    /// Without a font, text primitives are skipped.
    pub fn with_font_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.font = Some(bytes);
        self
    }

    /// Return options with the font read from `path`.
    pub fn with_font_path(self, path: &Path) -> ThreadlineResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Ok(self.with_font_bytes(bytes))
    }

    /// Return options with a clear color overriding the scene background (straight RGBA8).
    pub fn with_clear_rgba(mut self, clear: Option<[u8; 4]>) -> Self {
        self.clear_rgba = clear;
        self
    }
}

/// CPU rasterizer powered by `vello_cpu`, with `parley` text shaping.
pub struct CpuBackend {
    opts: CpuBackendOpts,
    text: Option<(TextLayoutEngine, vello_cpu::peniko::FontData)>,
}

impl CpuBackend {
    /// Create a backend; font bytes (if any) are registered up front.
    pub fn new(opts: CpuBackendOpts) -> ThreadlineResult<Self> {
        let text = match &opts.font {
            Some(bytes) => {
                let engine = TextLayoutEngine::new(bytes)?;
                let font = vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(bytes.clone()),
                    0,
                );
                Some((engine, font))
            }
            None => None,
        };
        Ok(Self { opts, text })
    }

    /// `true` when text primitives will be drawn.
    pub fn has_font(&self) -> bool {
        self.text.is_some()
    }

    fn draw_all(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        scene: &Scene,
    ) -> ThreadlineResult<()> {
        for prim in &scene.board {
            self.draw(ctx, prim, scene.view)?;
        }
        for prim in &scene.overlay {
            self.draw(ctx, prim, Affine::IDENTITY)?;
        }
        Ok(())
    }

    fn draw(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        prim: &Primitive,
        transform: Affine,
    ) -> ThreadlineResult<()> {
        match prim {
            Primitive::Circle {
                center,
                radius,
                color,
                width,
                dash,
            } => {
                if *radius <= 0.0 || *width <= 0.0 {
                    return Ok(());
                }
                let path = match dash {
                    None => circle_path(*center, *radius),
                    Some(pattern) => dashed_circle_path(*center, *radius, *pattern),
                };
                ctx.set_transform(affine_to_cpu(transform));
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
                ctx.set_paint(color_to_cpu(*color));
                ctx.stroke_path(&path);
            }
            Primitive::Line {
                from,
                to,
                color,
                width,
            } => {
                if *width <= 0.0 || color.a == 0 {
                    return Ok(());
                }
                let mut path = vello_cpu::kurbo::BezPath::new();
                path.move_to(point_to_cpu(*from));
                path.line_to(point_to_cpu(*to));
                ctx.set_transform(affine_to_cpu(transform));
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
                ctx.set_paint(color_to_cpu(*color));
                ctx.stroke_path(&path);
            }
            Primitive::Text {
                origin,
                text,
                size,
                color,
                anchor,
            } => {
                let Some((engine, font)) = self.text.as_mut() else {
                    tracing::trace!(text = text.as_str(), "no font configured; text skipped");
                    return Ok(());
                };
                let shaped = engine.shape(text, *size as f32)?;
                let dx = match anchor {
                    TextAnchor::Start => 0.0,
                    TextAnchor::Middle => -shaped.width / 2.0,
                };
                let placed = transform
                    * Affine::translate((origin.x + dx, origin.y - shaped.baseline));
                ctx.set_transform(affine_to_cpu(placed));
                ctx.set_paint(color_to_cpu(*color));
                for line in shaped.layout.lines() {
                    for item in line.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                            continue;
                        };
                        let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        });
                        ctx.glyph_run(font)
                            .font_size(run.run().font_size())
                            .fill_glyphs(glyphs);
                    }
                }
            }
        }
        Ok(())
    }
}

impl SceneBackend for CpuBackend {
    type Output = FrameRGBA;

    #[tracing::instrument(level = "debug", skip_all, fields(board = scene.board.len()))]
    fn render_scene(&mut self, scene: &Scene) -> ThreadlineResult<FrameRGBA> {
        let width = surface_dim(scene.size.width, "width")?;
        let height = surface_dim(scene.size.height, "height")?;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        let clear = match self.opts.clear_rgba {
            Some([r, g, b, a]) => Rgba8::new(r, g, b, a),
            None => scene.background,
        };
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color_to_cpu(clear));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));

        self.draw_all(&mut ctx, scene)?;

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: u32::from(width),
            height: u32::from(height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn surface_dim(v: f64, what: &str) -> ThreadlineResult<u16> {
    let rounded = v.round();
    if !rounded.is_finite() || rounded < 1.0 || rounded > f64::from(u16::MAX) {
        return Err(ThreadlineError::render(format!(
            "surface {what} must be in [1, {}] (got {v})",
            u16::MAX
        )));
    }
    Ok(rounded as u16)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn arc_steps(radius: f64, sweep: f64) -> usize {
    ((radius * sweep.abs() * CIRCLE_SEGMENTS_PER_PX).ceil() as usize).clamp(8, 720)
}

fn arc_into(
    path: &mut vello_cpu::kurbo::BezPath,
    center: Point,
    radius: f64,
    start: f64,
    sweep: f64,
) {
    let steps = arc_steps(radius, sweep);
    let at = |t: f64| {
        vello_cpu::kurbo::Point::new(center.x + radius * t.cos(), center.y + radius * t.sin())
    };
    path.move_to(at(start));
    for i in 1..=steps {
        path.line_to(at(start + sweep * (i as f64) / (steps as f64)));
    }
}

fn circle_path(center: Point, radius: f64) -> vello_cpu::kurbo::BezPath {
    let mut path = vello_cpu::kurbo::BezPath::new();
    arc_into(&mut path, center, radius, 0.0, std::f64::consts::TAU);
    path.close_path();
    path
}

fn dashed_circle_path(
    center: Point,
    radius: f64,
    [on, off]: [f64; 2],
) -> vello_cpu::kurbo::BezPath {
    if !(on > 0.0 && off >= 0.0 && on.is_finite() && off.is_finite()) {
        return circle_path(center, radius);
    }
    let circumference = std::f64::consts::TAU * radius;
    if circumference / (on + off) > MAX_DASHES_PER_CIRCLE {
        return circle_path(center, radius);
    }
    let mut path = vello_cpu::kurbo::BezPath::new();
    let mut s = 0.0;
    while s < circumference {
        let len = on.min(circumference - s);
        arc_into(&mut path, center, radius, s / radius, len / radius);
        s += on + off;
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
