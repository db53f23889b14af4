//! The global `config.json`.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use super::presets::write_json;
use crate::model::AppConfig;

/// Load and validate the config; any problem yields defaults.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("Config file not found at {:?}, using defaults", path);
            return AppConfig::default();
        }
        Err(e) => {
            warn!("Failed to read config from {:?}: {}", path, e);
            return AppConfig::default();
        }
    };

    match serde_json::from_str::<AppConfig>(&contents) {
        Ok(mut config) => {
            config.validate();
            config
        }
        Err(e) => {
            warn!("Failed to parse JSON from {:?}: {}, using defaults", path, e);
            AppConfig::default()
        }
    }
}

pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    write_json(config, path)
}
