use image::{DynamicImage, GrayImage, Luma, RgbaImage};

use crate::CompositeError;

mod binary;
mod canvas;

pub use binary::BinaryMask;
pub use canvas::{Canvas, BRUSH_GRAY};

/// Single channel paint intensity, one byte per pixel of the image it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskLayer(GrayImage);

impl MaskLayer {
    pub fn empty(width: u32, height: u32) -> Self {
        Self(GrayImage::new(width, height))
    }

    /// Paint intensity of a drawn layer is its alpha channel.
    pub fn from_alpha(layer: &RgbaImage) -> Self {
        let (width, height) = layer.dimensions();
        let pixels: &[[u8; 4]] = bytemuck::cast_slice(layer.as_raw().as_slice());
        let alpha = pixels.iter().map(|&[_, _, _, a]| a).collect();
        Self(GrayImage::from_raw(width, height, alpha).expect("One alpha byte per pixel"))
    }

    /// Uploaded mask images are read by brightness.
    pub fn from_luma(image: &DynamicImage) -> Self {
        Self(image.to_luma8())
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> u8) -> Self {
        Self(GrayImage::from_fn(width, height, |x, y| Luma([f(x, y)])))
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.0.dimensions()
    }

    pub fn values(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.as_raw().iter().copied()
    }

    pub fn count_masked(&self, threshold: Threshold) -> usize {
        self.values().filter(|v| threshold.is_masked(*v)).count()
    }

    pub fn as_luma(&self) -> &GrayImage {
        &self.0
    }
}

/// Cutoff level separating masked from unmasked pixels.
///
/// A pixel is masked if its value is strictly greater than the level, so the
/// default only selects fully painted pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct Threshold(u8);

impl Threshold {
    pub const FULLY_PAINTED: Self = Self(254);
    pub const MID_RANGE: Self = Self(127);

    pub const fn from_level(level: u8) -> Self {
        Self(level)
    }

    /// Threshold as a fraction of full intensity.
    pub fn new(fraction: f32) -> Result<Self, CompositeError> {
        if (0.0..=1.0).contains(&fraction) {
            Ok(Self((fraction * 255.0).round() as u8))
        } else {
            Err(CompositeError::InvalidParameter {
                name: "threshold",
                value: fraction,
            })
        }
    }

    pub fn level(self) -> u8 {
        self.0
    }

    pub fn is_masked(self, value: u8) -> bool {
        value > self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::FULLY_PAINTED
    }
}
