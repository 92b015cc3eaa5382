use std::path::Path;

use image::{DynamicImage, RgbImage, RgbaImage};

pub fn load_image(bytes: &[u8]) -> std::io::Result<DynamicImage> {
    image::load_from_memory(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

pub fn load_image_file(path: impl AsRef<Path>) -> std::io::Result<DynamicImage> {
    load_image(&std::fs::read(path)?)
}

/// Alpha is discarded, not composited onto any background.
pub fn drop_alpha(image: &RgbaImage) -> RgbImage {
    let (width, height) = image.dimensions();
    let pixels: &[[u8; 4]] = bytemuck::cast_slice(image.as_raw().as_slice());
    let rgb = pixels.iter().flat_map(|&[r, g, b, _]| [r, g, b]).collect();
    RgbImage::from_raw(width, height, rgb).expect("Three bytes per pixel")
}
