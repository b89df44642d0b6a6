use super::*;

#[test]
fn pad_to_even_keeps_pixels_and_adds_transparent_edge() {
    let f = FrameRGBA {
        width: 3,
        height: 1,
        data: vec![255; 12],
        premultiplied: true,
    };
    let p = f.pad_to_even();
    assert_eq!((p.width, p.height), (4, 2));
    assert_eq!(&p.data[..12], &[255; 12]);
    assert!(p.data[12..].iter().all(|&b| b == 0));

    let even = p.pad_to_even();
    assert_eq!(even, p);
}

#[test]
fn unpremultiply_restores_color() {
    let f = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![128, 0, 0, 128],
        premultiplied: true,
    };
    assert_eq!(f.to_straight_rgba8(), vec![255, 0, 0, 128]);
}

#[test]
fn save_png_writes_file() {
    let dir = std::path::PathBuf::from("target").join("frame_png");
    let out = dir.join("one.png");
    let _ = std::fs::remove_file(&out);
    let f = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![255; 16],
        premultiplied: true,
    };
    f.save_png(&out).unwrap();
    assert!(out.exists());
}
