use image::{DynamicImage, Rgba, RgbaImage};
use log::{debug, info};

use super::MaskLayer;

/// Color the brush paints with and uploaded masks are seeded in.
pub const BRUSH_GRAY: Rgba<u8> = Rgba([128, 128, 128, 255]);

/// What an image editor hands over: the uploaded background and the layers painted on top.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pub background: RgbaImage,
    pub layers: Vec<RgbaImage>,
}

impl Canvas {
    pub fn new(background: RgbaImage) -> Self {
        Self {
            background,
            layers: Vec::new(),
        }
    }

    pub fn from_image(image: &DynamicImage) -> Self {
        Self::new(image.to_rgba8())
    }

    pub fn with_layer(mut self, layer: RgbaImage) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn is_background_empty(&self) -> bool {
        self.background.as_raw().iter().all(|&b| b == 0)
    }

    /// Mask drawn on the first layer. Without layers nothing is masked.
    pub fn extract_mask(&self) -> MaskLayer {
        match self.layers.first() {
            Some(layer) => MaskLayer::from_alpha(layer),
            None => {
                let (width, height) = self.background.dimensions();
                MaskLayer::empty(width, height)
            }
        }
    }

    /// Replace the first layer with an uploaded mask, painting every white pixel in [`BRUSH_GRAY`].
    pub fn apply_mask_image(&mut self, mask_image: &DynamicImage) {
        let upload = MaskLayer::from_luma(mask_image);
        let (width, height) = upload.dimensions();

        if self.is_background_empty() {
            info!("Empty background, use transparent {width}x{height} canvas");
            self.background = RgbaImage::new(width, height);
        }

        let luma = upload.as_luma();
        let layer = RgbaImage::from_fn(width, height, |x, y| match luma.get_pixel(x, y).0 {
            [255] => BRUSH_GRAY,
            _ => Rgba([0, 0, 0, 0]),
        });
        debug!("Seed first layer from {width}x{height} mask image");

        match self.layers.first_mut() {
            Some(first) => *first = layer,
            None => self.layers.push(layer),
        }
    }
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma};

    use super::*;
    use crate::Threshold;

    fn striped_mask(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_fn(width, height, |x, _| match x % 3 {
            0 => Luma([255]),
            1 => Luma([254]),
            _ => Luma([0]),
        }))
    }

    #[test]
    fn no_layers_extracts_empty_mask() {
        let canvas = Canvas::new(RgbaImage::from_pixel(5, 3, Rgba([10, 20, 30, 255])));
        let mask = canvas.extract_mask();
        assert_eq!(mask.dimensions(), (5, 3));
        assert!(mask.values().all(|v| v == 0));
    }

    #[test]
    fn first_layer_alpha_is_mask() {
        let mut layer = RgbaImage::new(2, 2);
        layer.put_pixel(1, 0, BRUSH_GRAY);
        let canvas = Canvas::new(RgbaImage::from_pixel(2, 2, Rgba([1, 1, 1, 255])))
            .with_layer(layer)
            .with_layer(RgbaImage::from_pixel(2, 2, BRUSH_GRAY));

        let mask = canvas.extract_mask();
        assert_eq!(mask.values().collect::<Vec<_>>(), vec![0, 255, 0, 0]);
    }

    #[test]
    fn apply_mask_image_paints_only_pure_white() {
        let mut canvas = Canvas::new(RgbaImage::from_pixel(6, 2, Rgba([9, 9, 9, 255])));
        canvas.apply_mask_image(&striped_mask(6, 2));

        assert_eq!(canvas.layers.len(), 1);
        let layer = &canvas.layers[0];
        assert_eq!(*layer.get_pixel(0, 0), BRUSH_GRAY);
        assert_eq!(*layer.get_pixel(1, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*layer.get_pixel(2, 1), Rgba([0, 0, 0, 0]));
        assert_eq!(canvas.extract_mask().count_masked(Threshold::default()), 4);
        assert_eq!(*canvas.background.get_pixel(0, 0), Rgba([9, 9, 9, 255]));
    }

    #[test]
    fn apply_mask_image_replaces_first_layer() {
        let mut canvas = Canvas::new(RgbaImage::from_pixel(3, 1, Rgba([9, 9, 9, 255])))
            .with_layer(RgbaImage::from_pixel(3, 1, BRUSH_GRAY));
        canvas.apply_mask_image(&striped_mask(3, 1));

        assert_eq!(canvas.layers.len(), 1);
        assert_eq!(
            canvas.extract_mask().values().collect::<Vec<_>>(),
            vec![255, 0, 0]
        );
    }

    #[test]
    fn empty_background_is_resized_to_mask() {
        let mut canvas = Canvas::new(RgbaImage::new(1, 1));
        canvas.apply_mask_image(&striped_mask(4, 3));

        assert_eq!(canvas.background.dimensions(), (4, 3));
        assert!(canvas.is_background_empty());
        assert_eq!(canvas.extract_mask().dimensions(), (4, 3));
    }
}
