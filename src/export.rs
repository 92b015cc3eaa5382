use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};
use log::{debug, info};

use crate::{
    compose_binary_mask, compose_colored_overlay_rgba, image_utils::drop_alpha, BinaryMask,
    Canvas, CompositeError, Opacity, OverlayColor, Threshold, AGNOSTIC_OPACITY,
};

pub const MASK_VISIBILITY_FILE: &str = "mask_visibility.webp";
pub const AGNOSTIC_FILE: &str = "agnostic.webp";
pub const MASK_FILE: &str = "mask.png";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Composite(#[from] CompositeError),

    #[error("Image encoding: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Config: {0}")]
    Config(#[from] serde_json::Error),
}

/// User selections the three exports are rendered with.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ExportSettings {
    pub mask_color: String,
    pub opacity: Opacity,
    pub threshold: Threshold,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            mask_color: OverlayColor::default().to_string(),
            opacity: Opacity::default(),
            threshold: Threshold::default(),
        }
    }
}

impl ExportSettings {
    pub fn overlay_color(&self) -> OverlayColor {
        OverlayColor::parse_lossy(&self.mask_color)
    }
}

/// Files written by [`MaskExports::write_to`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub mask_visibility: PathBuf,
    pub agnostic: PathBuf,
    pub mask: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaskExports {
    pub mask_visibility: RgbImage,
    pub agnostic: RgbImage,
    pub mask: BinaryMask,
}

impl MaskExports {
    /// Overlays are blended onto the background with its alpha, which is dropped afterwards.
    pub fn from_canvas(canvas: &Canvas, settings: &ExportSettings) -> Result<Self, CompositeError> {
        let mask = canvas.extract_mask();
        debug!(
            "{} of {:?} pixels masked",
            mask.count_masked(settings.threshold),
            mask.dimensions()
        );

        let mask_visibility = compose_colored_overlay_rgba(
            &canvas.background,
            &mask,
            settings.overlay_color(),
            settings.opacity,
            settings.threshold,
        )?;
        let agnostic = compose_colored_overlay_rgba(
            &canvas.background,
            &mask,
            OverlayColor::AGNOSTIC_GRAY,
            AGNOSTIC_OPACITY,
            settings.threshold,
        )?;
        let mask = compose_binary_mask(&mask, settings.threshold);

        Ok(Self {
            mask_visibility: drop_alpha(&mask_visibility),
            agnostic: drop_alpha(&agnostic),
            mask,
        })
    }

    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<ExportPaths, ExportError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let paths = ExportPaths {
            mask_visibility: dir.join(MASK_VISIBILITY_FILE),
            agnostic: dir.join(AGNOSTIC_FILE),
            mask: dir.join(MASK_FILE),
        };
        self.mask_visibility
            .save_with_format(&paths.mask_visibility, ImageFormat::WebP)?;
        self.agnostic
            .save_with_format(&paths.agnostic, ImageFormat::WebP)?;
        self.mask
            .as_luma()
            .save_with_format(&paths.mask, ImageFormat::Png)?;

        info!("Exported masks to {}", dir.display());
        Ok(paths)
    }
}
