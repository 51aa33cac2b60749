use super::*;
use crate::foundation::core::{Point, Size};
use crate::scene::{SceneStats, Style};

fn one_of_each() -> Scene {
    Scene {
        size: Size::new(600.0, 600.0),
        background: Rgba8::opaque(255, 255, 255),
        view: Affine::translate((5.0, 6.0)) * Affine::scale(2.0),
        board: vec![
            Primitive::Circle {
                center: Point::new(300.0, 300.0),
                radius: 300.0,
                color: Rgba8::opaque(150, 150, 150),
                width: 1.0,
                dash: Some([6.0, 4.0]),
            },
            Primitive::Line {
                from: Point::new(0.0, 0.0),
                to: Point::new(10.0, 20.0),
                color: Rgba8::new(0, 0, 0, 77),
                width: 0.5,
            },
        ],
        overlay: vec![Primitive::Text {
            origin: Point::new(10.0, 24.0),
            text: "3 < 4 & 5".to_string(),
            size: 14.0,
            color: Rgba8::opaque(30, 30, 30),
            anchor: TextAnchor::Start,
        }],
        stats: SceneStats::default(),
        placeholder: false,
    }
}

#[test]
fn document_has_header_group_and_footer() {
    let svg = render_svg(&one_of_each(), "sans-serif");
    assert!(svg.starts_with(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="600" height="600""#
    ));
    assert!(svg.contains(r#"<g transform="matrix(2 0 0 2 5 6)">"#));
    assert!(svg.trim_end().ends_with("</svg>"));
    let g_end = svg.find("</g>").unwrap();
    let text_at = svg.find("<text").unwrap();
    assert!(text_at > g_end, "overlay must be outside the view group");
}

#[test]
fn primitives_carry_style_attributes() {
    let svg = render_svg(&one_of_each(), "sans-serif");
    assert!(svg.contains(r#"stroke-dasharray="6 4""#));
    assert!(svg.contains(
        r##"<line x1="0" y1="0" x2="10" y2="20" stroke="#000000" stroke-width="0.5" stroke-opacity="0.302"/>"##
    ));
    assert!(svg.contains(r#"fill="none""#));
}

#[test]
fn text_is_escaped() {
    let svg = render_svg(&one_of_each(), "A \"quoted\" face");
    assert!(svg.contains("3 &lt; 4 &amp; 5"));
    assert!(svg.contains("A &quot;quoted&quot; face"));
}

#[test]
fn backend_defaults_to_sans_serif() {
    let mut b = SvgBackend::default();
    let svg = b
        .render_scene(&Scene::placeholder(Size::new(100.0, 50.0), &Style::default()))
        .unwrap();
    assert!(svg.contains(r#"font-family="sans-serif""#));
    assert!(svg.contains(r#"text-anchor="middle">No data</text>"#));
}
