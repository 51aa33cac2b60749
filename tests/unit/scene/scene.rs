use super::*;
use crate::model::Nail;
use crate::viewport::{DragInput, WheelInput};

fn square() -> ArtResult {
    ArtResult::new(
        vec![
            Nail::new(0.0, 0.0),
            Nail::new(300.0, 0.0),
            Nail::new(300.0, 300.0),
            Nail::new(0.0, 300.0),
        ],
        vec![0, 1, 2, 3, 0, 2],
    )
}

fn build(result: &ArtResult, reveal: usize, opts: &SceneOptions) -> Scene {
    build_scene(
        Some(result),
        reveal,
        &BoardMapping::default(),
        &Viewport::default(),
        opts,
    )
}

#[test]
fn segment_count_tracks_reveal() {
    let r = square();
    for reveal in 0..=r.path_len() {
        let s = build(&r, reveal, &SceneOptions::default());
        assert_eq!(s.segments().count(), reveal.saturating_sub(1));
        assert_eq!(s.stats.segments_drawn, reveal.saturating_sub(1));
    }
}

#[test]
fn segments_are_mapped_to_stage_space() {
    let s = build(&square(), 2, &SceneOptions::default());
    let segs: Vec<_> = s.segments().collect();
    assert_eq!(segs, vec![(Point::new(0.0, 0.0), Point::new(600.0, 0.0))]);
}

#[test]
fn out_of_range_index_is_skipped_without_panicking() {
    let nails = (0..5).map(|i| Nail::new(f64::from(i), 0.0)).collect();
    let r = ArtResult::new(nails, vec![0, 1, 7, 2]);
    let s = build(&r, 4, &SceneOptions::default());
    assert_eq!(s.stats.segments_considered, 3);
    assert_eq!(s.stats.segments_drawn, 1);
    assert_eq!(s.stats.segments_skipped, 2);
    assert_eq!(
        s.segments().collect::<Vec<_>>(),
        vec![(Point::new(0.0, 0.0), Point::new(2.0, 0.0))]
    );
}

#[test]
fn empty_data_renders_placeholder_only() {
    let opts = SceneOptions::default();
    let cases = [
        ArtResult::new(vec![], vec![0, 1, 2]),
        ArtResult::new(vec![Nail::new(1.0, 1.0)], vec![]),
    ];
    for r in &cases {
        let s = build(r, 3, &opts);
        assert!(s.placeholder);
        assert!(s.board.is_empty());
        assert_eq!(s.stats, SceneStats::default());
        assert_eq!(s.texts().collect::<Vec<_>>(), vec![PLACEHOLDER_TEXT]);
    }
    let s = build_scene(
        None,
        0,
        &BoardMapping::default(),
        &Viewport::default(),
        &opts,
    );
    assert!(s.placeholder);
}

#[test]
fn viewport_transform_is_applied_once_for_the_board() {
    let mut v = Viewport::default();
    v.zoom_at(WheelInput {
        pointer_x: 100.0,
        pointer_y: 100.0,
        delta_y: -1.0,
    });
    v.pan_by(DragInput {
        delta_x: 5.0,
        delta_y: 5.0,
    });
    let r = square();
    let s = build_scene(
        Some(&r),
        3,
        &BoardMapping::default(),
        &v,
        &SceneOptions::default(),
    );
    assert_eq!(s.view, v.transform());
    let unzoomed = build(&r, 3, &SceneOptions::default());
    assert_eq!(s.board, unzoomed.board);
}

#[test]
fn toggles_control_nails_labels_and_boundary() {
    let r = square();
    let off = SceneOptions::default()
        .with_nails(false)
        .with_boundary(false);
    let s = build(&r, 1, &off);
    assert!(s.board.is_empty());
    assert_eq!(s.stats.nails_drawn, 0);

    let on = SceneOptions::default().with_labels(true);
    let s = build(&r, 1, &on);
    let circles = s
        .board
        .iter()
        .filter(|p| matches!(p, Primitive::Circle { dash: None, .. }))
        .count();
    assert_eq!(circles, 4);
    assert!(
        s.board
            .iter()
            .any(|p| matches!(p, Primitive::Circle { dash: Some(_), .. }))
    );
    let labels: Vec<_> = s.board.iter().filter_map(|p| match p {
        Primitive::Text { text, .. } => Some(text.as_str()),
        _ => None,
    }).collect();
    assert_eq!(labels, vec!["0", "1", "2", "3"]);
}

#[test]
fn chords_are_thin_and_semi_transparent() {
    let s = build(&square(), 3, &SceneOptions::default());
    for p in &s.board {
        if let Primitive::Line { color, width, .. } = p {
            assert!(color.a < 255);
            assert!(*width <= 1.0);
        }
    }
}

#[test]
fn progress_readout_is_in_overlay() {
    let r = square();
    let s = build(&r, 4, &SceneOptions::default());
    assert_eq!(s.overlay.len(), 1);
    assert!(matches!(
        &s.overlay[0],
        Primitive::Text { text, .. } if text == "4 / 6"
    ));
    let s = build(&r, 99, &SceneOptions::default());
    assert!(s.texts().any(|t| t == "6 / 6"));
}
