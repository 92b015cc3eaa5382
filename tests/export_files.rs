use image::{GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use mask_editor::{export_files, load_image_file, Config, ExportSettings, Opacity};

fn write_inputs(dir: &std::path::Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let image_path = dir.join("photo.png");
    let mask_path = dir.join("photo_mask.png");
    RgbImage::from_pixel(4, 4, Rgb([50, 100, 150]))
        .save_with_format(&image_path, ImageFormat::Png)
        .unwrap();
    GrayImage::from_fn(4, 4, |x, _| Luma([if x < 2 { 255 } else { 0 }]))
        .save_with_format(&mask_path, ImageFormat::Png)
        .unwrap();
    (image_path, mask_path)
}

#[test]
fn exports_image_with_uploaded_mask() {
    let dir = tempfile::tempdir().unwrap();
    let (image_path, mask_path) = write_inputs(dir.path());
    let out_dir = dir.path().join("out");
    let config = Config {
        export: ExportSettings {
            mask_color: "#ff0000".into(),
            opacity: Opacity::OPAQUE,
            ..Default::default()
        },
        output_dir: None,
    };

    let paths = export_files(&config, &image_path, Some(&mask_path), &out_dir).unwrap();

    let visibility = load_image_file(&paths.mask_visibility).unwrap().to_rgb8();
    assert_eq!(visibility.dimensions(), (4, 4));
    assert_eq!(visibility.get_pixel(0, 0).0, [255, 0, 0]);
    assert_eq!(visibility.get_pixel(3, 0).0, [50, 100, 150]);

    let agnostic = load_image_file(&paths.agnostic).unwrap().to_rgb8();
    assert_eq!(agnostic.get_pixel(1, 3).0, [128, 128, 128]);
    assert_eq!(agnostic.get_pixel(2, 3).0, [50, 100, 150]);

    let mask = load_image_file(&paths.mask).unwrap().to_luma8();
    assert_eq!(mask.dimensions(), (4, 4));
    assert!(mask.enumerate_pixels().all(|(x, _, p)| p.0 == [if x < 2 { 255 } else { 0 }]));
}

#[test]
fn exports_image_without_mask() {
    let dir = tempfile::tempdir().unwrap();
    let (image_path, _) = write_inputs(dir.path());

    let paths = export_files(&Config::default(), &image_path, None, dir.path()).unwrap();

    let visibility = load_image_file(&paths.mask_visibility).unwrap().to_rgb8();
    assert!(visibility.pixels().all(|p| p.0 == [50, 100, 150]));
    let mask = load_image_file(&paths.mask).unwrap().to_luma8();
    assert!(mask.pixels().all(|p| p.0 == [0]));
}

#[test]
fn missing_image_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = export_files(
        &Config::default(),
        &dir.path().join("missing.png"),
        None,
        dir.path(),
    );
    assert!(matches!(result, Err(mask_editor::ExportError::Io(_))));
}
