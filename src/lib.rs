mod app;
mod color;
mod compositor;
mod config;
mod export;
mod image_utils;
mod mask;

pub use app::{export_files, run_native};
pub use color::*;
pub use compositor::*;
pub use config::Config;
pub use export::*;
pub use image_utils::*;
pub use mask::*;
