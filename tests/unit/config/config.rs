use super::*;

#[test]
fn defaults_are_the_reference_behavior() {
    let cfg = VisualizerConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.board_size, Size::new(300.0, 300.0));
    assert_eq!(cfg.stage_size, Size::new(600.0, 600.0));
    assert_eq!(cfg.scale_bounds, ScaleBounds { min: 0.1, max: 3.0 });
    assert_eq!(cfg.step, 1);
    assert!(cfg.show_nails);
    assert!(!cfg.show_labels);
}

#[test]
fn partial_json_fills_defaults() {
    let cfg: VisualizerConfig =
        serde_json::from_str(r#"{"step": 12, "show_labels": true, "style": {"nail_radius": 5}}"#)
            .unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.step, 12);
    assert!(cfg.show_labels);
    assert_eq!(cfg.style.nail_radius, 5.0);
    assert_eq!(cfg.style.segment_opacity, Style::default().segment_opacity);
    assert_eq!(cfg.tick_interval_ms, VisualizerConfig::default().tick_interval_ms);
}

#[test]
fn invalid_values_are_rejected() {
    let bad = [
        VisualizerConfig {
            step: 0,
            ..VisualizerConfig::default()
        },
        VisualizerConfig {
            step: 51,
            ..VisualizerConfig::default()
        },
        VisualizerConfig {
            tick_interval_ms: 0,
            ..VisualizerConfig::default()
        },
        VisualizerConfig {
            board_size: Size::new(0.0, 300.0),
            ..VisualizerConfig::default()
        },
        VisualizerConfig {
            scale_bounds: ScaleBounds { min: 3.0, max: 0.1 },
            ..VisualizerConfig::default()
        },
        VisualizerConfig {
            style: Style {
                segment_opacity: 1.5,
                ..Style::default()
            },
            ..VisualizerConfig::default()
        },
    ];
    for cfg in &bad {
        assert!(cfg.validate().is_err(), "{cfg:?}");
    }
}

#[test]
fn degenerate_boundary_dash_is_rejected() {
    let cfg: VisualizerConfig =
        serde_json::from_str(r#"{"style":{"boundary_dash":[0.0001,0.0]}}"#).unwrap();
    assert!(cfg.validate().is_err());

    for dash in [[f64::NAN, 4.0], [6.0, -1.0], [6.0, f64::INFINITY], [0.4, 4.0]] {
        let cfg = VisualizerConfig {
            style: Style {
                boundary_dash: dash,
                ..Style::default()
            },
            ..VisualizerConfig::default()
        };
        assert!(cfg.validate().is_err(), "{dash:?}");
    }

    let cfg = VisualizerConfig {
        style: Style {
            boundary_dash: [MIN_DASH_LENGTH, 0.0],
            ..Style::default()
        },
        ..VisualizerConfig::default()
    };
    assert!(cfg.validate().is_ok());
}

#[test]
fn from_path_reads_and_validates() {
    let dir = std::path::PathBuf::from("target").join("config_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let ok = dir.join("ok.json");
    std::fs::write(&ok, br#"{"tick_interval_ms": 20}"#).unwrap();
    let cfg = VisualizerConfig::from_path(&ok).unwrap();
    assert_eq!(cfg.tick_interval(), Duration::from_millis(20));

    let bad = dir.join("bad.json");
    std::fs::write(&bad, br#"{"step": 99}"#).unwrap();
    assert!(VisualizerConfig::from_path(&bad).is_err());

    assert!(VisualizerConfig::from_path(&dir.join("missing.json")).is_err());
}

#[test]
fn builds_components() {
    let cfg = VisualizerConfig::default();
    assert_eq!(cfg.mapping().unwrap(), BoardMapping::default());
    assert_eq!(cfg.viewport().unwrap(), Viewport::default());
    assert_eq!(cfg.clock().unwrap().interval(), DEFAULT_TICK_INTERVAL);
    assert_eq!(cfg.scene_options(), SceneOptions::default());
}
