//! Pure event reducer.
//!
//! ```text
//! AppEvent ──▶ handle_event(&mut AppState) ──▶ Vec<UiCommand> ──▶ AppKit
//! ```
//!
//! Keeping this free of FFI lets the open/edit/close rules be tested
//! without a window server.

use tracing::{debug, trace};

use crate::events::AppEvent;
use crate::model::AppState;

/// Work for the platform layer, executed in order.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    /// Create and show every panel window of a preset.
    OpenPreset(usize),
    /// Close every panel window of a preset.
    ClosePreset(usize),
    /// Show the grid-size editor for a preset.
    OpenEditor(usize),
    /// Close the grid-size editor for a preset.
    CloseEditor(usize),
    /// Show or hide edit-mode grid lines on a preset's panels.
    ShowGrid { preset: usize, visible: bool },
    /// Re-layout one panel after its grid changed.
    RelayoutPanel { preset: usize, panel: usize },
    /// Update the size labels of one editor row.
    RefreshEditor { preset: usize, panel: usize },
    /// Set the alpha of every open panel window.
    ApplyOpacity(f64),
    /// Show the global settings window.
    OpenGlobalConfig,
    /// Write presets and config to disk.
    Persist,
    /// Terminate the application (state is persisted on termination).
    Terminate,
}

/// Apply `event` to `state` and return the resulting UI work.
pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<UiCommand> {
    if event.is_noisy() {
        trace!("event: {:?}", event);
    } else {
        debug!("event: {} ({:?})", event.description(), event);
    }

    match event {
        AppEvent::TogglePreset(preset) => {
            let was_editing = state.is_editing(preset);
            match state.toggle_preset(preset) {
                Some(true) => vec![UiCommand::OpenPreset(preset)],
                Some(false) if was_editing => vec![
                    UiCommand::CloseEditor(preset),
                    UiCommand::ClosePreset(preset),
                ],
                Some(false) => vec![UiCommand::ClosePreset(preset)],
                None => Vec::new(),
            }
        }

        AppEvent::ToggleEdit(preset) => {
            let was_open = state.is_open(preset);
            match state.toggle_edit(preset) {
                Some(true) => {
                    let mut cmds = Vec::with_capacity(3);
                    if !was_open {
                        cmds.push(UiCommand::OpenPreset(preset));
                    }
                    cmds.push(UiCommand::OpenEditor(preset));
                    cmds.push(UiCommand::ShowGrid {
                        preset,
                        visible: true,
                    });
                    cmds
                }
                Some(false) => vec![
                    UiCommand::CloseEditor(preset),
                    UiCommand::ShowGrid {
                        preset,
                        visible: false,
                    },
                ],
                None => Vec::new(),
            }
        }

        AppEvent::EditorClosed(preset) => {
            // The window is already gone; the handle still needs releasing.
            let mut cmds = vec![UiCommand::CloseEditor(preset)];
            if state.editor_closed(preset) && state.is_open(preset) {
                cmds.push(UiCommand::ShowGrid {
                    preset,
                    visible: false,
                });
            }
            cmds
        }

        AppEvent::AdjustGrid {
            preset,
            panel,
            axis,
            delta,
        } => {
            if state.adjust_grid(preset, panel, axis, delta) {
                vec![
                    UiCommand::RelayoutPanel { preset, panel },
                    UiCommand::RefreshEditor { preset, panel },
                ]
            } else {
                Vec::new()
            }
        }

        AppEvent::PanelFrameChanged {
            preset,
            panel,
            frame,
        } => {
            state.set_panel_frame(preset, panel, frame);
            Vec::new()
        }

        AppEvent::MainWindowMoved { x, y } => {
            state.set_main_window_position(x, y);
            Vec::new()
        }

        AppEvent::OpacityChanged(opacity) => {
            let applied = state.set_opacity(opacity);
            vec![UiCommand::ApplyOpacity(applied)]
        }

        AppEvent::OpenGlobalConfig => vec![UiCommand::OpenGlobalConfig],

        AppEvent::SaveAll => vec![UiCommand::Persist],

        AppEvent::Quit => vec![UiCommand::Terminate],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AppConfig, Panel, Preset};

    fn state_with(n: usize) -> AppState {
        let presets = (0..n)
            .map(|i| {
                let mut p = Preset::new(format!("p{i}"));
                p.panels.push(Panel::default());
                p
            })
            .collect();
        AppState::new(presets, AppConfig::default())
    }

    #[test]
    fn test_unknown_preset_yields_nothing() {
        let mut s = state_with(1);
        assert!(handle_event(&mut s, AppEvent::TogglePreset(7)).is_empty());
        assert!(handle_event(&mut s, AppEvent::ToggleEdit(7)).is_empty());
    }

    #[test]
    fn test_quit_terminates() {
        let mut s = state_with(0);
        assert_eq!(handle_event(&mut s, AppEvent::Quit), vec![UiCommand::Terminate]);
    }
}
