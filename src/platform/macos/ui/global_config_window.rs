//! Global settings window: panel opacity slider and a save button.

use crate::events::{publish, AppEvent};
use crate::model::constants::{MAX_PANEL_OPACITY, MIN_PANEL_OPACITY};
use crate::model::AppConfig;
use crate::platform::macos::app::{
    centered_on_main_screen, make_button, make_label, register_class, WindowHandle,
};
use crate::platform::macos::ffi::bridge::{
    get_class, id, msg_send, nil, nsstring_id, sel, AnyObject, NSPoint, NSRect, NSSize, Sel, NO,
    YES,
};

const TARGET_CLASS: &std::ffi::CStr = c"DwellpadGlobalConfig";

// Titled | Closable | UtilityWindow
const CONFIG_STYLE: u64 = 1 | 2 | 16;

const WINDOW_SIZE: (f64, f64) = (300.0, 150.0);

unsafe fn target_class() -> &'static objc2::runtime::AnyClass {
    register_class(TARGET_CLASS, "NSObject", |builder| {
        builder.add_method(
            sel!(opacityChanged:),
            opacity_changed as unsafe extern "C-unwind" fn(_, _, _),
        );
        builder.add_method(
            sel!(saveAll:),
            save_all as unsafe extern "C-unwind" fn(_, _, _),
        );
    })
}

unsafe extern "C-unwind" fn opacity_changed(_this: &mut AnyObject, _cmd: Sel, sender: id) {
    if sender == nil {
        return;
    }
    let value: f64 = msg_send![sender, doubleValue];
    publish(AppEvent::OpacityChanged(value));
}

unsafe extern "C-unwind" fn save_all(_this: &mut AnyObject, _cmd: Sel, _sender: id) {
    publish(AppEvent::SaveAll);
}

/// Create the settings window. It is hidden, not destroyed, when closed
/// and can be shown again with [`show_global_config`].
///
/// # Safety
/// Main thread only.
pub unsafe fn create_global_config(config: &AppConfig) -> WindowHandle {
    let target: id = msg_send![target_class(), new];

    let (width, height) = WINDOW_SIZE;
    let window: id = msg_send![get_class("NSPanel"), alloc];
    let window: id = msg_send![
        window,
        initWithContentRect: centered_on_main_screen(width, height),
        styleMask: CONFIG_STYLE,
        backing: 2u64,
        defer: NO
    ];
    let _: () = msg_send![window, setReleasedWhenClosed: NO];
    let _: () = msg_send![window, setFloatingPanel: YES];
    let _: () = msg_send![window, setTitle: nsstring_id("Global Config")];

    let content: id = msg_send![window, contentView];

    let label = make_label(
        NSRect::new(NSPoint::new(20.0, 100.0), NSSize::new(100.0, 20.0)),
        "Panel Opacity:",
    );
    let _: () = msg_send![content, addSubview: label];
    let _: () = msg_send![label, release];

    let slider: id = msg_send![get_class("NSSlider"), alloc];
    let slider: id = msg_send![
        slider,
        initWithFrame: NSRect::new(NSPoint::new(130.0, 98.0), NSSize::new(150.0, 24.0))
    ];
    let _: () = msg_send![slider, setMinValue: MIN_PANEL_OPACITY];
    let _: () = msg_send![slider, setMaxValue: MAX_PANEL_OPACITY];
    let _: () = msg_send![slider, setDoubleValue: config.opacity];
    let _: () = msg_send![slider, setContinuous: YES];
    let _: () = msg_send![slider, setTarget: target];
    let _: () = msg_send![slider, setAction: sel!(opacityChanged:)];
    let _: () = msg_send![content, addSubview: slider];
    let _: () = msg_send![slider, release];

    let save = make_button(
        NSRect::new(NSPoint::new(190.0, 20.0), NSSize::new(90.0, 28.0)),
        "Save",
        target,
        sel!(saveAll:),
        0,
    );
    let _: () = msg_send![content, addSubview: save];
    let _: () = msg_send![save, release];

    WindowHandle { window, target }
}

/// # Safety
/// `handle` must come from [`create_global_config`]. Main thread only.
pub unsafe fn show_global_config(handle: &WindowHandle) {
    let _: () = msg_send![handle.window, makeKeyAndOrderFront: nil];
}
