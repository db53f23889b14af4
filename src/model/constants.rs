//! Configuration constants and default values.
//!
//! This module contains all application constants including panel defaults,
//! interaction tunables, file names and validation limits.

// === Panel Defaults ===

/// Default grid columns/rows when a panel does not specify them.
pub const DEFAULT_GRID_DIM: u32 = 1;

/// Default panel window origin X (screen coordinates, origin bottom-left).
pub const DEFAULT_PANEL_X: f64 = 50.0;

/// Default panel window origin Y.
pub const DEFAULT_PANEL_Y: f64 = 500.0;

/// Default panel window width.
pub const DEFAULT_PANEL_WIDTH: f64 = 500.0;

/// Default panel window height.
pub const DEFAULT_PANEL_HEIGHT: f64 = 500.0;

/// Window level for preset panels (just below the status bar level).
pub const PANEL_WINDOW_LEVEL: i64 = 24;

/// Size of the presets list window.
pub const MAIN_WINDOW_SIZE: (f64, f64) = (200.0, 100.0);

/// Title of the presets list window.
pub const MAIN_WINDOW_TITLE: &str = "Dwellpad";

// === Opacity ===

/// Default panel opacity.
pub const DEFAULT_PANEL_OPACITY: f64 = 0.75;

/// Minimum panel opacity (slider lower bound).
pub const MIN_PANEL_OPACITY: f64 = 0.1;

/// Maximum panel opacity.
pub const MAX_PANEL_OPACITY: f64 = 1.0;

// === Dwell ===

/// Default dwell delay in seconds before a hovered cell presses its key.
pub const DEFAULT_DWELL_DELAY_SECS: f64 = 0.1;

/// Minimum dwell delay in seconds.
pub const MIN_DWELL_DELAY_SECS: f64 = 0.05;

/// Maximum dwell delay in seconds.
pub const MAX_DWELL_DELAY_SECS: f64 = 5.0;

// === Joystick ===

/// Radius (px) around the joystick centre where no key is held.
pub const JOYSTICK_DEAD_ZONE: f64 = 20.0;

/// Per-axis offset (px) beyond which a direction key is held.
pub const JOYSTICK_AXIS_THRESHOLD: f64 = 10.0;

/// Joystick sampling interval in seconds.
pub const JOYSTICK_POLL_SECS: f64 = 0.05;

// === Click dwell ===

/// Time the cursor must stay still before the click box arms or clicks.
pub const CLICK_DWELL_SECS: f64 = 0.25;

/// Allowed cursor jitter (px) while dwelling for a click.
pub const CLICK_DWELL_JITTER: f64 = 5.0;

/// Click dwell polling interval in seconds.
pub const CLICK_DWELL_POLL_SECS: f64 = 0.1;

// === Event pump ===

/// Interval of the main-thread timer that drains the event bus.
pub const EVENT_PUMP_SECS: f64 = 0.03;

// === Files ===

/// Directory name under the platform config dir.
pub const APP_DIR: &str = "dwellpad";

/// Presets sub-directory name.
pub const PRESETS_DIR: &str = "presets";

/// Global config file name.
pub const CONFIG_FILENAME: &str = "config.json";

/// Extension of preset files.
pub const PRESET_EXTENSION: &str = "json";
