//! Application events for inter-module communication.
//!
//! These events are published by window controllers, panel delegates and
//! the preset editor, then handled on the main thread by the reducer.
//! This module is pure Rust with no FFI dependencies, making it fully testable.

use crate::geometry::Rect;
use crate::model::GridAxis;

/// Application-level events.
///
/// Preset and panel references are indices into `AppState::presets` and
/// `Preset::panels`.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    // === Presets window ===
    /// Show or hide a preset's panels.
    TogglePreset(usize),

    /// Enter or leave edit mode for a preset (opens it if hidden).
    ToggleEdit(usize),

    /// Open the global settings window.
    OpenGlobalConfig,

    /// The presets window was moved.
    MainWindowMoved { x: f64, y: f64 },

    // === Preset editor ===
    /// Change a panel's column or row count.
    AdjustGrid {
        preset: usize,
        panel: usize,
        axis: GridAxis,
        delta: i32,
    },

    /// The preset editor window was closed by the user.
    EditorClosed(usize),

    // === Panels ===
    /// A panel window was moved or resized.
    PanelFrameChanged {
        preset: usize,
        panel: usize,
        frame: Rect,
    },

    // === Global settings ===
    /// Opacity slider changed.
    OpacityChanged(f64),

    // === Lifecycle ===
    /// Write every preset and the config to disk.
    SaveAll,

    /// Persist and terminate.
    Quit,
}

impl AppEvent {
    /// Returns a human-readable description of the event for debugging.
    pub fn description(&self) -> &'static str {
        match self {
            AppEvent::TogglePreset(_) => "Toggle preset visibility",
            AppEvent::ToggleEdit(_) => "Toggle preset edit mode",
            AppEvent::OpenGlobalConfig => "Open global settings",
            AppEvent::MainWindowMoved { .. } => "Presets window moved",
            AppEvent::AdjustGrid { .. } => "Adjust panel grid",
            AppEvent::EditorClosed(_) => "Preset editor closed",
            AppEvent::PanelFrameChanged { .. } => "Panel moved or resized",
            AppEvent::OpacityChanged(_) => "Panel opacity changed",
            AppEvent::SaveAll => "Save presets and config",
            AppEvent::Quit => "Quit application",
        }
    }

    /// Frequent geometry updates, logged at trace level only.
    pub fn is_noisy(&self) -> bool {
        matches!(
            self,
            AppEvent::MainWindowMoved { .. }
                | AppEvent::PanelFrameChanged { .. }
                | AppEvent::OpacityChanged(_)
        )
    }
}
