use super::*;

#[test]
fn reference_mapping_doubles_coordinates() {
    let m = BoardMapping::default();
    assert_eq!(m.map(Nail::new(0.0, 0.0)), Point::new(0.0, 0.0));
    assert_eq!(m.map(Nail::new(150.0, 75.0)), Point::new(300.0, 150.0));
    assert_eq!(m.map(Nail::new(300.0, 300.0)), Point::new(600.0, 600.0));
}

#[test]
fn axes_scale_independently() {
    let m = BoardMapping::new(Size::new(300.0, 300.0), Size::new(800.0, 600.0)).unwrap();
    let p = m.map(Nail::new(300.0, 300.0));
    assert!((p.x - 800.0).abs() < 1e-9);
    assert!((p.y - 600.0).abs() < 1e-9);
    assert!((m.board_radius() - 300.0).abs() < 1e-9);
    assert_eq!(m.board_center(), Point::new(400.0, 300.0));
}

#[test]
fn degenerate_sizes_are_rejected() {
    assert!(BoardMapping::new(Size::new(0.0, 300.0), Size::new(600.0, 600.0)).is_err());
    assert!(BoardMapping::new(Size::new(300.0, 300.0), Size::new(600.0, f64::NAN)).is_err());
}
