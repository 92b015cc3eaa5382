use image::{GrayImage, RgbImage};

/// Two level mask, every pixel is either 0 or 255.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask(GrayImage);

impl BinaryMask {
    pub const SELECTED: u8 = u8::MAX;
    pub const UNSELECTED: u8 = 0;

    pub(crate) fn new_unchecked(luma: GrayImage) -> Self {
        Self(luma)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.0.dimensions()
    }

    pub fn is_selected(&self, x: u32, y: u32) -> bool {
        self.0.get_pixel(x, y).0[0] == Self::SELECTED
    }

    /// Same mask with the level replicated into three channels.
    pub fn to_rgb(&self) -> RgbImage {
        let (width, height) = self.dimensions();
        let rgb = self.0.as_raw().iter().flat_map(|&v| [v, v, v]).collect();
        RgbImage::from_raw(width, height, rgb).expect("Three bytes per pixel")
    }

    pub fn as_luma(&self) -> &GrayImage {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use image::Luma;

    use super::*;

    #[test]
    fn to_rgb_replicates_level() {
        let mask = BinaryMask::new_unchecked(GrayImage::from_fn(2, 1, |x, _| {
            Luma([if x == 0 { 0 } else { 255 }])
        }));
        let rgb = mask.to_rgb();
        assert_eq!(rgb.dimensions(), (2, 1));
        assert_eq!(rgb.as_raw(), &vec![0, 0, 0, 255, 255, 255]);
        assert!(!mask.is_selected(0, 0));
        assert!(mask.is_selected(1, 0));
    }
}
