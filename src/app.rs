use std::{
    io,
    path::{Path, PathBuf},
};

use log::info;

use crate::{
    config::Config,
    image_utils::load_image_file,
    Canvas, ExportError, ExportPaths, MaskExports,
};

const USAGE: &str = "Usage: mask-editor <image> [mask] [out_dir]";

/// Renders the three exports for `image_path`, seeding the mask from `mask_path` if given.
pub fn export_files(
    config: &Config,
    image_path: &Path,
    mask_path: Option<&Path>,
    out_dir: &Path,
) -> Result<ExportPaths, ExportError> {
    let mut canvas = Canvas::from_image(&load_image_file(image_path)?);
    if let Some(mask_path) = mask_path {
        info!("Seed mask from {}", mask_path.display());
        canvas.apply_mask_image(&load_image_file(mask_path)?);
    }

    let exports = MaskExports::from_canvas(&canvas, &config.export)?;
    exports.write_to(out_dir)
}

pub fn run_native() -> Result<(), ExportError> {
    env_logger::init();

    let config = Config::load("config.json")?;
    info!("Run with config: {config:?}");

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let image_path = args
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, USAGE))?;
    let mask_path = args.next();
    let out_dir = args
        .next()
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| ".".into());

    let paths = export_files(&config, &image_path, mask_path.as_deref(), &out_dir)?;
    info!("Wrote {paths:?}");
    Ok(())
}
