//! JSON persistence for presets and the global config.
//!
//! Loading is best effort: unreadable or malformed files are logged and
//! skipped (presets) or replaced by defaults (config). Saving reports errors
//! to the caller, except [`persist_all`] which logs and carries on.

pub mod config;
pub mod paths;
pub mod presets;

pub use config::{load_config, save_config};
pub use paths::AppPaths;
pub use presets::{load_preset, load_presets, save_preset};

use tracing::{error, info};

use crate::model::AppState;

/// Save every preset and the config. Individual failures are logged.
///
/// Returns the number of files that failed to save.
pub fn persist_all(state: &AppState, paths: &AppPaths) -> usize {
    let mut failures = 0;

    for preset in &state.presets {
        if let Err(e) = save_preset(preset) {
            error!("Failed to save preset {:?}: {:#}", preset.display_name(), e);
            failures += 1;
        }
    }

    if let Err(e) = save_config(&state.config, &paths.config_file) {
        error!("Failed to save config: {:#}", e);
        failures += 1;
    }

    info!(
        "Saved {} preset(s) and config ({} failure(s))",
        state.presets.len(),
        failures
    );
    failures
}
