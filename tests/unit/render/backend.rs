use super::*;

fn frame(data: Vec<u8>, w: u32, h: u32) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data,
        premultiplied: true,
    }
}

#[test]
fn pixel_is_bounds_checked() {
    let f = frame((0..16).collect(), 2, 2);
    assert_eq!(f.pixel(1, 1), Some([12, 13, 14, 15]));
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 2), None);
}

#[test]
fn unpremultiply_restores_straight_color() {
    let f = frame(vec![100, 50, 25, 128, 0, 0, 0, 0, 10, 20, 30, 255], 3, 1);
    let s = f.to_straight_rgba();
    assert_eq!(&s[0..4], &[199, 100, 50, 128]);
    assert_eq!(&s[4..8], &[0, 0, 0, 0]);
    assert_eq!(&s[8..12], &[10, 20, 30, 255]);
}

#[test]
fn save_png_roundtrips_through_image() {
    let dir = std::path::PathBuf::from("target").join("backend_unit");
    let path = dir.join("nested").join("px.png");
    let _ = std::fs::remove_file(&path);
    frame(vec![255, 0, 0, 255], 1, 1).save_png(&path).unwrap();
    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
}
