//! Locations of the presets directory and config file.

use std::path::PathBuf;

use crate::model::constants::{APP_DIR, CONFIG_FILENAME, PRESETS_DIR};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub presets_dir: PathBuf,
    pub config_file: PathBuf,
}

impl AppPaths {
    /// Command-line overrides win; otherwise `<config dir>/dwellpad/`.
    pub fn resolve(presets_dir: Option<PathBuf>, config_file: Option<PathBuf>) -> Self {
        let base = Self::app_dir();
        Self {
            presets_dir: presets_dir.unwrap_or_else(|| base.join(PRESETS_DIR)),
            config_file: config_file.unwrap_or_else(|| base.join(CONFIG_FILENAME)),
        }
    }

    /// Per-user application directory, or the working directory when the
    /// platform has no config dir.
    pub fn app_dir() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(APP_DIR);
        path
    }
}
