use std::{
    io,
    path::{Path, PathBuf},
};

use crate::{ExportError, ExportSettings};

#[derive(serde::Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub export: ExportSettings,
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Missing files yield the defaults, anything else unreadable is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        match std::fs::File::open(path) {
            Ok(f) => Ok(serde_json::from_reader(io::BufReader::new(f))?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(e.into()),
        }
    }
}
