//! Presets, panels and actions as stored in preset JSON files.
//!
//! A preset file looks like:
//!
//! ```json
//! {
//!     "name": "Arrows",
//!     "panels": [
//!         {
//!             "width": 3,
//!             "height": 3,
//!             "screen_x": 50.0,
//!             "screen_y": 500.0,
//!             "screen_width": 300.0,
//!             "screen_height": 300.0,
//!             "actions": [
//!                 { "x": 1, "y": 0, "key": "up" },
//!                 { "x": 1, "y": 1, "key": "", "type": "joystick" }
//!             ]
//!         }
//!     ]
//! }
//! ```
//!
//! Fields this crate does not know about are kept in `extra` and written
//! back on save.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::constants::*;
use crate::geometry::{GridLayout, Rect, Size};
use crate::keys::{KeyChord, MouseButton};

/// A named collection of panels, identified by its file path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preset {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub panels: Vec<Panel>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// File the preset was loaded from. Never serialized.
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

/// Presets compare by persisted content; the file path is ignored.
impl PartialEq for Preset {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.panels == other.panels && self.extra == other.extra
    }
}

impl Preset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Name used in the UI; falls back to the file stem for unnamed presets.
    pub fn display_name(&self) -> String {
        if !self.name.is_empty() {
            return self.name.clone();
        }
        self.path
            .as_ref()
            .and_then(|p| p.file_stem())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Preset".to_string())
    }
}

/// An on-screen grid of action cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    /// Grid columns.
    #[serde(default = "default_grid_dim")]
    pub width: u32,
    /// Grid rows.
    #[serde(default = "default_grid_dim")]
    pub height: u32,
    #[serde(default = "default_screen_x")]
    pub screen_x: f64,
    #[serde(default = "default_screen_y")]
    pub screen_y: f64,
    #[serde(default = "default_screen_width")]
    pub screen_width: f64,
    #[serde(default = "default_screen_height")]
    pub screen_height: f64,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_grid_dim() -> u32 {
    DEFAULT_GRID_DIM
}

fn default_screen_x() -> f64 {
    DEFAULT_PANEL_X
}

fn default_screen_y() -> f64 {
    DEFAULT_PANEL_Y
}

fn default_screen_width() -> f64 {
    DEFAULT_PANEL_WIDTH
}

fn default_screen_height() -> f64 {
    DEFAULT_PANEL_HEIGHT
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_DIM,
            height: DEFAULT_GRID_DIM,
            screen_x: DEFAULT_PANEL_X,
            screen_y: DEFAULT_PANEL_Y,
            screen_width: DEFAULT_PANEL_WIDTH,
            screen_height: DEFAULT_PANEL_HEIGHT,
            actions: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl Panel {
    /// Window frame in screen coordinates.
    pub fn frame(&self) -> Rect {
        Rect::new(
            self.screen_x,
            self.screen_y,
            self.screen_width,
            self.screen_height,
        )
    }

    pub fn set_frame(&mut self, frame: Rect) {
        self.screen_x = frame.origin.x;
        self.screen_y = frame.origin.y;
        self.screen_width = frame.size.width;
        self.screen_height = frame.size.height;
    }

    /// Grid layout of this panel for a content view of size `bounds`.
    pub fn grid(&self, bounds: Size) -> GridLayout {
        GridLayout::new(self.width, self.height, bounds)
    }
}

/// What a cell does when interacted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Hover: hold the key after the dwell delay, release on exit.
    #[default]
    Dwell,
    /// Click: press and release the chord once.
    Tap,
    /// Hover joystick holding direction keys.
    Joystick,
    /// Dwell to arm, then dwell the cursor anywhere to click a mouse button.
    Click,
}

impl ActionKind {
    pub fn is_dwell(&self) -> bool {
        *self == ActionKind::Dwell
    }
}

/// Direction key names for joystick cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoystickKeys {
    #[serde(default = "default_up", skip_serializing_if = "is_default_up")]
    pub up: String,
    #[serde(default = "default_down", skip_serializing_if = "is_default_down")]
    pub down: String,
    #[serde(default = "default_left", skip_serializing_if = "is_default_left")]
    pub left: String,
    #[serde(default = "default_right", skip_serializing_if = "is_default_right")]
    pub right: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_up() -> String {
    "up".to_string()
}

fn default_down() -> String {
    "down".to_string()
}

fn default_left() -> String {
    "left".to_string()
}

fn default_right() -> String {
    "right".to_string()
}

fn is_default_up(key: &str) -> bool {
    key == "up"
}

fn is_default_down(key: &str) -> bool {
    key == "down"
}

fn is_default_left(key: &str) -> bool {
    key == "left"
}

fn is_default_right(key: &str) -> bool {
    key == "right"
}

impl Default for JoystickKeys {
    fn default() -> Self {
        Self {
            up: default_up(),
            down: default_down(),
            left: default_left(),
            right: default_right(),
            extra: Map::new(),
        }
    }
}

/// One keybound cell within a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Grid column.
    pub x: u32,
    /// Grid row (0 = top).
    pub y: u32,
    #[serde(default)]
    pub key: String,
    #[serde(default, rename = "type", skip_serializing_if = "ActionKind::is_dwell")]
    pub kind: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joystick: Option<JoystickKeys>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Action {
    pub fn new(x: u32, y: u32, key: impl Into<String>) -> Self {
        Self {
            x,
            y,
            key: key.into(),
            kind: ActionKind::Dwell,
            label: None,
            joystick: None,
            extra: Map::new(),
        }
    }

    pub fn with_kind(mut self, kind: ActionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Chord for dwell/tap cells.
    pub fn chord(&self) -> Option<KeyChord> {
        KeyChord::parse(&self.key)
    }

    /// Mouse button for click cells.
    pub fn button(&self) -> Option<MouseButton> {
        MouseButton::parse(&self.key)
    }

    /// Direction keys for joystick cells (arrows unless configured).
    pub fn joystick_keys(&self) -> JoystickKeys {
        self.joystick.clone().unwrap_or_default()
    }

    /// Text drawn on the cell.
    pub fn display_label(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        match self.kind {
            ActionKind::Joystick if self.key.is_empty() => "✥".to_string(),
            ActionKind::Click if self.key.is_empty() => "right click".to_string(),
            ActionKind::Click => format!("{} click", self.key),
            _ => self.key.clone(),
        }
    }
}
