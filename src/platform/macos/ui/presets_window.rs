//! Main window: one toggle button and one edit button per preset.
//!
//! The controller object is the target of every button, the window delegate
//! and the owner of the event pump timer.

use tracing::info;

use crate::events::{publish, AppEvent};
use crate::model::constants::{MAIN_WINDOW_SIZE, MAIN_WINDOW_TITLE};
use crate::model::{AppConfig, Preset};
use crate::platform::macos::app::{
    centered_on_main_screen, make_button, register_class, WindowHandle,
};
use crate::platform::macos::ffi::bridge::{
    get_class, id, msg_send, nil, nsstring_id, sel, AnyObject, Bool, NSPoint, NSRect, NSSize, Sel,
    NO,
};
use crate::platform::macos::handlers::dispatch_events;

const CONTROLLER_CLASS: &std::ffi::CStr = c"DwellpadController";

// Titled | Closable | Miniaturizable
const MAIN_STYLE: u64 = 1 | 2 | 4;

const ROW_HEIGHT: f64 = 30.0;
const MARGIN: f64 = 10.0;

/// Native objects of the presets window.
pub struct PresetsWindow {
    pub handle: WindowHandle,
    /// Toggle buttons by preset index, kept in sync with the open state.
    pub toggles: Vec<id>,
}

unsafe fn controller_class() -> &'static objc2::runtime::AnyClass {
    register_class(CONTROLLER_CLASS, "NSObject", |builder| {
        builder.add_method(
            sel!(togglePreset:),
            toggle_preset as unsafe extern "C-unwind" fn(_, _, _),
        );
        builder.add_method(
            sel!(editPreset:),
            edit_preset as unsafe extern "C-unwind" fn(_, _, _),
        );
        builder.add_method(
            sel!(openSettings:),
            open_settings as unsafe extern "C-unwind" fn(_, _, _),
        );
        builder.add_method(
            sel!(windowDidMove:),
            window_did_move as unsafe extern "C-unwind" fn(_, _, _),
        );
        builder.add_method(
            sel!(windowShouldClose:),
            window_should_close as unsafe extern "C-unwind" fn(_, _, _) -> _,
        );
        builder.add_method(
            sel!(pumpEvents:),
            pump_events as unsafe extern "C-unwind" fn(_, _, _),
        );
    })
}

/// Create the controller object (target, delegate and pump timer owner).
///
/// # Safety
/// Main thread only.
pub unsafe fn create_controller() -> id {
    msg_send![controller_class(), new]
}

unsafe fn sender_index(sender: id) -> Option<usize> {
    if sender == nil {
        return None;
    }
    let tag: i64 = msg_send![sender, tag];
    usize::try_from(tag).ok()
}

unsafe extern "C-unwind" fn toggle_preset(_this: &mut AnyObject, _cmd: Sel, sender: id) {
    if let Some(i) = sender_index(sender) {
        publish(AppEvent::TogglePreset(i));
    }
}

unsafe extern "C-unwind" fn edit_preset(_this: &mut AnyObject, _cmd: Sel, sender: id) {
    if let Some(i) = sender_index(sender) {
        publish(AppEvent::ToggleEdit(i));
    }
}

unsafe extern "C-unwind" fn open_settings(_this: &mut AnyObject, _cmd: Sel, _sender: id) {
    publish(AppEvent::OpenGlobalConfig);
}

unsafe extern "C-unwind" fn window_did_move(_this: &mut AnyObject, _cmd: Sel, notification: id) {
    let window: id = msg_send![notification, object];
    if window == nil {
        return;
    }
    let frame: NSRect = msg_send![window, frame];
    publish(AppEvent::MainWindowMoved {
        x: frame.origin.x,
        y: frame.origin.y,
    });
}

unsafe extern "C-unwind" fn window_should_close(_this: &mut AnyObject, _cmd: Sel, _sender: id) -> Bool {
    info!("Main window closed, quitting");
    publish(AppEvent::Quit);
    // Termination closes the window.
    NO
}

unsafe extern "C-unwind" fn pump_events(_this: &mut AnyObject, _cmd: Sel, _timer: id) {
    dispatch_events();
}

/// Build and show the presets window.
///
/// # Safety
/// Main thread only. `controller` must come from [`create_controller`].
pub unsafe fn create_presets_window(
    controller: id,
    presets: &[Preset],
    config: &AppConfig,
) -> PresetsWindow {
    let (width, min_height) = MAIN_WINDOW_SIZE;
    let height = min_height.max(presets.len() as f64 * ROW_HEIGHT + 50.0);

    let rect = match config.main_window {
        Some(pos) => NSRect::new(NSPoint::new(pos.x, pos.y), NSSize::new(width, height)),
        None => centered_on_main_screen(width, height),
    };

    let window: id = msg_send![get_class("NSWindow"), alloc];
    let window: id = msg_send![
        window,
        initWithContentRect: rect,
        styleMask: MAIN_STYLE,
        backing: 2u64,
        defer: NO
    ];
    let _: () = msg_send![window, setReleasedWhenClosed: NO];
    let _: () = msg_send![window, setTitle: nsstring_id(MAIN_WINDOW_TITLE)];
    let _: () = msg_send![window, setAlphaValue: 0.95f64];
    // The saved position is the frame origin, not the content origin.
    if let Some(pos) = config.main_window {
        let _: () = msg_send![window, setFrameOrigin: NSPoint::new(pos.x, pos.y)];
    }

    let content: id = msg_send![window, contentView];
    let mut toggles = Vec::with_capacity(presets.len());
    for (i, preset) in presets.iter().enumerate() {
        let y = height - MARGIN - ROW_HEIGHT * (i as f64 + 1.0);
        let tag = i as i64;

        let toggle = make_button(
            NSRect::new(NSPoint::new(MARGIN, y), NSSize::new(130.0, 26.0)),
            &preset.display_name(),
            controller,
            sel!(togglePreset:),
            tag,
        );
        // NSButtonTypePushOnPushOff
        let _: () = msg_send![toggle, setButtonType: 1u64];
        let _: () = msg_send![content, addSubview: toggle];
        let _: () = msg_send![toggle, release];
        toggles.push(toggle);

        let edit = make_button(
            NSRect::new(NSPoint::new(MARGIN + 136.0, y), NSSize::new(44.0, 26.0)),
            "",
            controller,
            sel!(editPreset:),
            tag,
        );
        let icon: id = msg_send![
            get_class("NSImage"),
            imageWithSystemSymbolName: nsstring_id("pencil"),
            accessibilityDescription: nsstring_id("Edit")
        ];
        if icon != nil {
            let _: () = msg_send![edit, setImage: icon];
        } else {
            let _: () = msg_send![edit, setTitle: nsstring_id("✎")];
        }
        let _: () = msg_send![content, addSubview: edit];
        let _: () = msg_send![edit, release];
    }

    let settings = make_button(
        NSRect::new(NSPoint::new(MARGIN, MARGIN), NSSize::new(width - 2.0 * MARGIN, 26.0)),
        "Settings",
        controller,
        sel!(openSettings:),
        -1,
    );
    let _: () = msg_send![content, addSubview: settings];
    let _: () = msg_send![settings, release];

    let _: () = msg_send![window, setDelegate: controller];
    let _: () = msg_send![window, makeKeyAndOrderFront: nil];

    PresetsWindow {
        handle: WindowHandle {
            window,
            target: controller,
        },
        toggles,
    }
}

/// Reflect a preset's open state on its toggle button.
///
/// # Safety
/// `toggle` must be a button from [`create_presets_window`].
pub unsafe fn set_toggle_state(toggle: id, open: bool) {
    // NSControlStateValueOn / Off
    let state: i64 = if open { 1 } else { 0 };
    let _: () = msg_send![toggle, setState: state];
}
