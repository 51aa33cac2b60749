use std::fmt::Write as _;

use crate::foundation::core::{Affine, Rgba8};
use crate::foundation::error::ThreadlineResult;
use crate::render::backend::SceneBackend;
use crate::scene::{Primitive, Scene, TextAnchor};

/// Writes scenes as standalone SVG documents.
///
/// Board primitives share one `<g transform="matrix(..)">`, mirroring how the raster backend
/// applies the view transform once for the whole board.
#[derive(Clone, Debug, Default)]
pub struct SvgBackend {
    /// Font family used for text elements.
    pub font_family: Option<String>,
}

impl SceneBackend for SvgBackend {
    type Output = String;

    fn render_scene(&mut self, scene: &Scene) -> ThreadlineResult<String> {
        Ok(render_svg(scene, self.font_family.as_deref().unwrap_or("sans-serif")))
    }
}

/// Serialize `scene` as an SVG document.
pub fn render_svg(scene: &Scene, font_family: &str) -> String {
    let (w, h) = (scene.size.width, scene.size.height);
    let mut out = String::with_capacity(128 + scene.board.len() * 96);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    let _ = writeln!(
        out,
        r#"<rect width="100%" height="100%" fill="{}"{}/>"#,
        scene.background.hex(),
        opacity_attr("fill-opacity", scene.background)
    );
    let _ = writeln!(out, r#"<g transform="{}">"#, matrix(scene.view));
    for p in &scene.board {
        write_primitive(&mut out, p, font_family);
    }
    out.push_str("</g>\n");
    for p in &scene.overlay {
        write_primitive(&mut out, p, font_family);
    }
    out.push_str("</svg>\n");
    out
}

fn matrix(a: Affine) -> String {
    let [a, b, c, d, e, f] = a.as_coeffs();
    format!("matrix({a} {b} {c} {d} {e} {f})")
}

fn opacity_attr(name: &str, c: Rgba8) -> String {
    if c.a == 255 {
        String::new()
    } else {
        format!(r#" {name}="{:.3}""#, c.alpha_f64())
    }
}

fn write_primitive(out: &mut String, p: &Primitive, font_family: &str) {
    match p {
        Primitive::Circle {
            center,
            radius,
            color,
            width,
            dash,
        } => {
            let dash = dash
                .map(|[on, off]| format!(r#" stroke-dasharray="{on} {off}""#))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                r#"<circle cx="{}" cy="{}" r="{radius}" fill="none" stroke="{}" stroke-width="{width}"{}{dash}/>"#,
                center.x,
                center.y,
                color.hex(),
                opacity_attr("stroke-opacity", *color),
            );
        }
        Primitive::Line {
            from,
            to,
            color,
            width,
        } => {
            let _ = writeln!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{width}"{}/>"#,
                from.x,
                from.y,
                to.x,
                to.y,
                color.hex(),
                opacity_attr("stroke-opacity", *color),
            );
        }
        Primitive::Text {
            origin,
            text,
            size,
            color,
            anchor,
        } => {
            let anchor = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
            };
            let _ = writeln!(
                out,
                r#"<text x="{}" y="{}" font-family="{}" font-size="{size}" fill="{}"{} text-anchor="{anchor}">{}</text>"#,
                origin.x,
                origin.y,
                escape(font_family),
                color.hex(),
                opacity_attr("fill-opacity", *color),
                escape(text),
            );
        }
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
