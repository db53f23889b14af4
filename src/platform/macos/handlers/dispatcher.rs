//! Event dispatcher for the AppKit layer.
//!
//! Called from the main-thread pump timer. Drains the event bus, reduces
//! each event against the session state and executes the resulting
//! [`UiCommand`]s.
//!
//! # Architecture
//!
//! ```text
//! drain_events() → handle_event(&mut AppState) → execute(UiCommand) → AppKit
//! ```
//!
//! The session is borrowed per command. Termination runs with no borrow
//! held because the termination observer persists through the session.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::events::drain_events;
use crate::handlers::{handle_event, UiCommand};
use crate::platform::macos::app::{with_session, Session};
use crate::platform::macos::ffi::bridge::{msg_send, nil, NSApp};
use crate::platform::macos::ui::{
    close_editor, close_panel_window, create_global_config, open_editor, open_panel_window,
    refresh_editor_row, set_panel_grid, set_panel_grid_visible, set_panel_opacity,
    set_toggle_state, show_global_config,
};
use crate::storage::persist_all;

/// Prevents a nested run loop (menu tracking, live resize) from re-entering
/// the dispatcher through another pump tick.
static DISPATCH_GUARD: AtomicBool = AtomicBool::new(false);

/// Dispatch all pending events from the global event bus.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn dispatch_events() {
    if DISPATCH_GUARD
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return;
    }

    let mut terminate = false;
    for event in drain_events() {
        let Some(commands) = with_session(|s| handle_event(&mut s.state, event)) else {
            continue;
        };
        for command in commands {
            if command == UiCommand::Terminate {
                terminate = true;
            } else {
                with_session(|s| execute(s, command));
            }
        }
        if terminate {
            break;
        }
    }

    DISPATCH_GUARD.store(false, Ordering::SeqCst);

    if terminate {
        info!("Terminating");
        let _: () = msg_send![NSApp(), terminate: nil];
    }
}

/// Execute one command against the session.
///
/// # Safety
/// Must be called from the main thread.
unsafe fn execute(s: &mut Session, command: UiCommand) {
    debug!("ui command: {:?}", command);
    match command {
        UiCommand::OpenPreset(i) => open_preset(s, i),

        UiCommand::ClosePreset(i) => {
            if let Some(handles) = s.panels.remove(&i) {
                for handle in handles {
                    close_panel_window(handle);
                }
            }
            if let Some(&toggle) = s.toggles.get(i) {
                set_toggle_state(toggle, false);
            }
        }

        UiCommand::OpenEditor(i) => {
            if s.editors.contains_key(&i) {
                return;
            }
            if let Some(preset) = s.state.presets.get(i) {
                let handle = open_editor(i, preset);
                s.editors.insert(i, handle);
            }
        }

        UiCommand::CloseEditor(i) => {
            if let Some(handle) = s.editors.remove(&i) {
                close_editor(handle);
            }
        }

        UiCommand::ShowGrid { preset, visible } => {
            for handle in s.panels.get(&preset).into_iter().flatten() {
                set_panel_grid_visible(handle, visible);
            }
        }

        UiCommand::RelayoutPanel { preset, panel } => {
            let model = s
                .state
                .presets
                .get(preset)
                .and_then(|p| p.panels.get(panel));
            let handle = s.panels.get(&preset).and_then(|h| h.get(panel));
            if let (Some(model), Some(handle)) = (model, handle) {
                set_panel_grid(handle, model);
            }
        }

        UiCommand::RefreshEditor { preset, panel } => {
            let model = s
                .state
                .presets
                .get(preset)
                .and_then(|p| p.panels.get(panel));
            if let (Some(model), Some(handle)) = (model, s.editors.get(&preset)) {
                refresh_editor_row(handle, panel, model.width, model.height);
            }
        }

        UiCommand::ApplyOpacity(opacity) => {
            for handle in s.panels.values().flatten() {
                set_panel_opacity(handle, opacity);
            }
        }

        UiCommand::OpenGlobalConfig => {
            let handle = match s.global_config {
                Some(handle) => handle,
                None => {
                    let handle = create_global_config(&s.state.config);
                    s.global_config = Some(handle);
                    handle
                }
            };
            show_global_config(&handle);
        }

        UiCommand::Persist => {
            let failures = persist_all(&s.state, &s.paths);
            if failures == 0 {
                info!("Saved presets and config");
            } else {
                warn!("Save finished with {} failure(s)", failures);
            }
        }

        // Handled by the caller without a session borrow.
        UiCommand::Terminate => {}
    }
}

unsafe fn open_preset(s: &mut Session, i: usize) {
    if s.panels.contains_key(&i) {
        return;
    }
    let Some(preset) = s.state.presets.get(i) else {
        return;
    };
    let title = preset.display_name();
    let opacity = s.state.config.opacity;
    let delay = s.state.config.dwell_delay();
    let grid_visible = s.state.is_editing(i);

    info!("Opening preset '{}' ({} panels)", title, preset.panels.len());
    let handles = preset
        .panels
        .iter()
        .enumerate()
        .map(|(p, panel)| open_panel_window(i, p, panel, &title, opacity, delay, grid_visible))
        .collect();
    s.panels.insert(i, handles);

    if let Some(&toggle) = s.toggles.get(i) {
        set_toggle_state(toggle, true);
    }
}
