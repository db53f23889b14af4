//! Preset files: one JSON document per preset.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::model::constants::PRESET_EXTENSION;
use crate::model::Preset;

/// Load every `*.json` preset in `dir`, sorted by file name.
///
/// A missing directory or a file that fails to parse is logged and skipped.
pub fn load_presets(dir: &Path) -> Vec<Preset> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot read presets directory {:?}: {}", dir, e);
            return Vec::new();
        }
    };

    let mut files: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(PRESET_EXTENSION))
        })
        .collect();
    files.sort();

    let presets: Vec<Preset> = files
        .iter()
        .filter_map(|path| match load_preset(path) {
            Ok(preset) => Some(preset),
            Err(e) => {
                warn!("Skipping preset {:?}: {:#}", path, e);
                None
            }
        })
        .collect();

    info!("Loaded {} preset(s) from {:?}", presets.len(), dir);
    presets
}

/// Read one preset and remember where it came from.
pub fn load_preset(path: &Path) -> Result<Preset> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read preset from {:?}", path))?;
    let mut preset: Preset = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse JSON from {:?}", path))?;
    preset.path = Some(path.to_path_buf());
    debug!(
        "Loaded preset {:?} with {} panel(s)",
        preset.display_name(),
        preset.panels.len()
    );
    Ok(preset)
}

/// Write a preset back to the file it was loaded from.
pub fn save_preset(preset: &Preset) -> Result<()> {
    let Some(path) = preset.path.as_deref() else {
        bail!("Preset {:?} has no file path", preset.display_name());
    };
    write_json(preset, path)
}

/// Serialize `value` with 4-space indentation, creating parent directories.
pub(crate) fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .with_context(|| format!("Failed to serialize {:?}", path))?;
    buf.push(b'\n');

    // Staged beside the target and renamed into place.
    let tmp = staging_path(path);
    let written = fs::File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(&buf)?;
            file.sync_all()
        })
        .with_context(|| format!("Failed to write {:?}", tmp))
        .and_then(|()| {
            fs::rename(&tmp, path)
                .with_context(|| format!("Failed to replace {:?}", path))
        });
    if written.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    written?;
    debug!("Wrote {:?}", path);
    Ok(())
}

/// Hidden sibling of `path` used while writing it.
pub(crate) fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}
