//! User interface module.
//!
//! ## Panels
//! - panel_window.rs: floating non-activating panel windows and their delegate
//! - panel_view.rs: grid layout of cells, edit-mode grid lines
//! - cell_view.rs: dwell, tap, joystick and click cells
//!
//! ## Windows
//! - presets_window.rs: main window and its controller
//! - preset_config_window.rs: per-preset grid editor
//! - global_config_window.rs: opacity slider and save button

pub mod cell_view;
pub mod global_config_window;
pub mod panel_view;
pub mod panel_window;
pub mod preset_config_window;
pub mod presets_window;

pub use global_config_window::{create_global_config, show_global_config};
pub use panel_window::{
    close_panel_window, open_panel_window, set_panel_grid, set_panel_grid_visible,
    set_panel_opacity,
};
pub use preset_config_window::{close_editor, open_editor, refresh_editor_row};
pub use presets_window::{create_controller, create_presets_window, set_toggle_state, PresetsWindow};
