use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("fuzzytext_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("nested")).unwrap();
    dir
}

fn write_png(path: &Path) {
    let img = image::RgbaImage::from_fn(16, 8, |x, y| {
        image::Rgba([(x * 16) as u8, (y * 32) as u8, 200, 255])
    });
    img.save(path).unwrap();
}

#[test]
fn converts_pngs_recursively_and_skips_others() {
    let dir = scratch_dir("webp_tree");
    write_png(&dir.join("a.png"));
    write_png(&dir.join("nested").join("B.PNG"));
    std::fs::write(dir.join("notes.txt"), "not an image").unwrap();

    let converted = convert_png_tree(&dir).unwrap();
    assert_eq!(converted.len(), 2);
    assert_eq!(converted[0].output, dir.join("a.webp"));
    assert_eq!(converted[1].output, dir.join("nested").join("B.webp"));
    for c in &converted {
        assert!(c.output.exists());
        assert!(c.output_bytes > 0);
    }

    let back = image::open(dir.join("a.webp")).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (16, 8));
    assert_eq!(back.get_pixel(3, 2).0, [48, 64, 200, 255]);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn savings_handles_growth_and_empty_input() {
    let c = ConvertedImage {
        input: "a.png".into(),
        output: "a.webp".into(),
        input_bytes: 200,
        output_bytes: 50,
    };
    assert_eq!(c.savings_percent(), 75.0);
    let grew = ConvertedImage {
        output_bytes: 300,
        ..c.clone()
    };
    assert_eq!(grew.savings_percent(), -50.0);
    let empty = ConvertedImage { input_bytes: 0, ..c };
    assert_eq!(empty.savings_percent(), 0.0);
}

#[test]
fn missing_dir_is_an_error() {
    assert!(convert_png_tree(Path::new("/definitely/not/here")).is_err());
}
