//! Application state (pure Rust, no FFI).
//!
//! Holds the loaded presets and config together with which presets are
//! currently shown and which are in edit mode. All mutation goes through
//! methods here so the reducer and tests see the same rules.

use std::collections::BTreeSet;

use super::config::{AppConfig, WindowPosition};
use super::preset::Preset;
use crate::geometry::Rect;

/// Grid dimension changed by the preset editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAxis {
    /// Columns.
    Width,
    /// Rows.
    Height,
}

/// Complete runtime state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub presets: Vec<Preset>,
    pub config: AppConfig,
    open: BTreeSet<usize>,
    editing: BTreeSet<usize>,
}

impl AppState {
    pub fn new(presets: Vec<Preset>, mut config: AppConfig) -> Self {
        config.validate();
        Self {
            presets,
            config,
            open: BTreeSet::new(),
            editing: BTreeSet::new(),
        }
    }

    pub fn is_open(&self, preset: usize) -> bool {
        self.open.contains(&preset)
    }

    pub fn is_editing(&self, preset: usize) -> bool {
        self.editing.contains(&preset)
    }

    pub fn open_presets(&self) -> impl Iterator<Item = usize> + '_ {
        self.open.iter().copied()
    }

    /// Shows or hides a preset. Hiding also leaves edit mode.
    ///
    /// Returns the new open state, or `None` for an unknown index.
    pub fn toggle_preset(&mut self, preset: usize) -> Option<bool> {
        if preset >= self.presets.len() {
            return None;
        }
        if self.open.remove(&preset) {
            self.editing.remove(&preset);
            Some(false)
        } else {
            self.open.insert(preset);
            Some(true)
        }
    }

    /// Flips edit mode, opening the preset first if it is hidden.
    ///
    /// Returns the new edit state, or `None` for an unknown index.
    pub fn toggle_edit(&mut self, preset: usize) -> Option<bool> {
        if preset >= self.presets.len() {
            return None;
        }
        self.open.insert(preset);
        if self.editing.remove(&preset) {
            Some(false)
        } else {
            self.editing.insert(preset);
            Some(true)
        }
    }

    /// The editor window was closed by the user.
    ///
    /// Returns true if the preset was in edit mode.
    pub fn editor_closed(&mut self, preset: usize) -> bool {
        self.editing.remove(&preset)
    }

    /// Adds `delta` to a panel's columns or rows, never going below 1.
    ///
    /// Returns true if the dimension changed.
    pub fn adjust_grid(&mut self, preset: usize, panel: usize, axis: GridAxis, delta: i32) -> bool {
        let Some(panel) = self
            .presets
            .get_mut(preset)
            .and_then(|p| p.panels.get_mut(panel))
        else {
            return false;
        };
        let dim = match axis {
            GridAxis::Width => &mut panel.width,
            GridAxis::Height => &mut panel.height,
        };
        let current = (*dim).max(1) as i64;
        let next = (current + delta as i64).clamp(1, u32::MAX as i64) as u32;
        if next == *dim {
            return false;
        }
        *dim = next;
        true
    }

    /// Records a panel window's frame after a move or resize.
    pub fn set_panel_frame(&mut self, preset: usize, panel: usize, frame: Rect) -> bool {
        match self
            .presets
            .get_mut(preset)
            .and_then(|p| p.panels.get_mut(panel))
        {
            Some(panel) => {
                panel.set_frame(frame);
                true
            }
            None => false,
        }
    }

    pub fn set_main_window_position(&mut self, x: f64, y: f64) {
        self.config.main_window = Some(WindowPosition { x, y });
    }

    /// Sets panel opacity (clamped) and returns the applied value.
    pub fn set_opacity(&mut self, opacity: f64) -> f64 {
        self.config.opacity = opacity;
        self.config.validate();
        self.config.opacity
    }
}
