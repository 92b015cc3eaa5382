use image::{GrayImage, RgbImage, RgbaImage};
use itertools::Itertools;
use log::debug;

use crate::{BinaryMask, MaskLayer, OverlayColor, Threshold};

/// Opacity of the gray agnostic overlay, masked pixels are fully covered.
pub const AGNOSTIC_OPACITY: Opacity = Opacity::OPAQUE;

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum CompositeError {
    #[error("Mask of size {mask:?} doesn't match image of size {image:?}")]
    InvalidInputShape { image: (u32, u32), mask: (u32, u32) },

    #[error("{name} must be within [0, 1], got {value}")]
    InvalidParameter { name: &'static str, value: f32 },
}

/// Weight of the overlay color when blending it onto the image.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Opacity(f32);

impl Opacity {
    pub const TRANSPARENT: Self = Self(0.0);
    pub const OPAQUE: Self = Self(1.0);

    pub fn new(value: f32) -> Result<Self, CompositeError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CompositeError::InvalidParameter {
                name: "opacity",
                value,
            })
        }
    }

    pub fn get(self) -> f32 {
        self.0
    }

    /// Truncated, so 0.7 maps to 178.
    fn as_alpha(self) -> u8 {
        (self.0 * 255.0) as u8
    }
}

impl Default for Opacity {
    fn default() -> Self {
        Self(0.7)
    }
}

impl TryFrom<f32> for Opacity {
    type Error = CompositeError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Opacity> for f32 {
    fn from(value: Opacity) -> Self {
        value.0
    }
}

/// Blends `color` over the image wherever the mask is above the default threshold.
pub fn compose_colored_overlay(
    image: &RgbImage,
    mask: &MaskLayer,
    color: OverlayColor,
    opacity: Opacity,
) -> Result<RgbImage, CompositeError> {
    compose_colored_overlay_with(image, mask, color, opacity, Threshold::default())
}

/// Neutral gray overlay, independent of the chosen overlay color.
pub fn compose_agnostic_overlay(
    image: &RgbImage,
    mask: &MaskLayer,
) -> Result<RgbImage, CompositeError> {
    compose_colored_overlay(image, mask, OverlayColor::AGNOSTIC_GRAY, AGNOSTIC_OPACITY)
}

pub fn compose_colored_overlay_with(
    image: &RgbImage,
    mask: &MaskLayer,
    color: OverlayColor,
    opacity: Opacity,
    threshold: Threshold,
) -> Result<RgbImage, CompositeError> {
    check_shape(image.dimensions(), mask)?;
    debug!(
        "Overlay {color} with opacity {} above level {} on {:?}",
        opacity.get(),
        threshold.level(),
        image.dimensions()
    );

    let alpha = opacity.as_alpha();
    let luts = color.0.map(|channel| build_blend_lut(channel, alpha));

    let mut result = image.clone();
    for (pixel, value) in result.pixels_mut().zip_eq(mask.values()) {
        if threshold.is_masked(value) {
            for (c, lut) in pixel.0.iter_mut().zip(&luts) {
                *c = lut[*c as usize];
            }
        }
    }
    Ok(result)
}

/// Source-over blend onto a background that may itself be translucent.
///
/// Masked pixels end with alpha `a + a_b * (1 - a)`, their color is the
/// unpremultiplied mix of overlay and background.
pub fn compose_colored_overlay_rgba(
    image: &RgbaImage,
    mask: &MaskLayer,
    color: OverlayColor,
    opacity: Opacity,
    threshold: Threshold,
) -> Result<RgbaImage, CompositeError> {
    check_shape(image.dimensions(), mask)?;
    debug!(
        "Overlay {color} with opacity {} above level {} on RGBA {:?}",
        opacity.get(),
        threshold.level(),
        image.dimensions()
    );

    let alpha = opacity.as_alpha();
    let mut result = image.clone();
    for (pixel, value) in result.pixels_mut().zip_eq(mask.values()) {
        if threshold.is_masked(value) {
            pixel.0 = blend_over(pixel.0, color, alpha);
        }
    }
    Ok(result)
}

/// Hard two level quantization of the mask.
pub fn compose_binary_mask(mask: &MaskLayer, threshold: Threshold) -> BinaryMask {
    let (width, height) = mask.dimensions();
    debug!("Binary mask above level {} on {width}x{height}", threshold.level());

    let levels = mask
        .values()
        .map(|v| {
            if threshold.is_masked(v) {
                BinaryMask::SELECTED
            } else {
                BinaryMask::UNSELECTED
            }
        })
        .collect();
    BinaryMask::new_unchecked(
        GrayImage::from_raw(width, height, levels).expect("One level per mask pixel"),
    )
}

fn check_shape(image: (u32, u32), mask: &MaskLayer) -> Result<(), CompositeError> {
    if image != mask.dimensions() {
        return Err(CompositeError::InvalidInputShape {
            image,
            mask: mask.dimensions(),
        });
    }
    Ok(())
}

fn blend_over([r, g, b, base_alpha]: [u8; 4], color: OverlayColor, alpha: u8) -> [u8; 4] {
    let (alpha, base_alpha) = (alpha as u32, base_alpha as u32);
    // Resulting alpha, scaled by 255
    let out_alpha = alpha * 255 + base_alpha * (255 - alpha);
    if out_alpha == 0 {
        return [r, g, b, 0];
    }
    let channel = |c: u8, base: u8| {
        let mixed = c as u32 * alpha * 255 + base as u32 * base_alpha * (255 - alpha);
        ((mixed + out_alpha / 2) / out_alpha) as u8
    };
    let [cr, cg, cb] = color.0;
    [
        channel(cr, r),
        channel(cg, g),
        channel(cb, b),
        ((out_alpha + 127) / 255) as u8,
    ]
}

/// Result for every base value when `channel` is blended on top with `alpha`.
fn build_blend_lut(channel: u8, alpha: u8) -> [u8; 256] {
    let (channel, alpha) = (channel as u32, alpha as u32);
    std::array::from_fn(|base| ((channel * alpha + base as u32 * (255 - alpha) + 127) / 255) as u8)
}
