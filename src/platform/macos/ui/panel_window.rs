//! Floating, non-activating panel windows.
//!
//! Panels never take key focus away from the application receiving the
//! synthesized keys. Their frames are reported back through the event bus
//! so the preset records where the user left them.

use std::time::Duration;

use tracing::debug;

use super::panel_view::{create_panel_view, set_grid, set_grid_visible, teardown_panel_view};
use crate::events::{publish, AppEvent};
use crate::model::constants::PANEL_WINDOW_LEVEL;
use crate::model::Panel;
use crate::platform::macos::app::{register_class, PanelHandle};
use crate::platform::macos::ffi::bridge::{
    get_class, id, msg_send, nil, ns_rect, nsstring_id, rect_from_ns, sel, AnyObject, NSRect,
    ObjectExt, Sel, NO, YES,
};

const DELEGATE_CLASS: &std::ffi::CStr = c"DwellpadPanelDelegate";

// Titled | Closable | Miniaturizable | Resizable | UtilityWindow | NonactivatingPanel
const PANEL_STYLE: u64 = 1 | 2 | 4 | 8 | 16 | 128;

// NSWindowZoomButton
const ZOOM_BUTTON: u64 = 2;

// CanJoinAllSpaces | FullScreenAuxiliary
const COLLECTION_BEHAVIOR: u64 = 1 | 256;

unsafe fn delegate_class() -> &'static objc2::runtime::AnyClass {
    register_class(DELEGATE_CLASS, "NSObject", |builder| {
        builder.add_ivar::<usize>(c"_preset");
        builder.add_ivar::<usize>(c"_panel");
        builder.add_method(
            sel!(windowDidMove:),
            window_frame_changed as unsafe extern "C-unwind" fn(_, _, _),
        );
        builder.add_method(
            sel!(windowDidResize:),
            window_frame_changed as unsafe extern "C-unwind" fn(_, _, _),
        );
        builder.add_method(
            sel!(windowWillClose:),
            window_will_close as unsafe extern "C-unwind" fn(_, _, _),
        );
    })
}

unsafe extern "C-unwind" fn window_frame_changed(this: &mut AnyObject, _cmd: Sel, notification: id) {
    let window: id = msg_send![notification, object];
    if window == nil {
        return;
    }
    let frame: NSRect = msg_send![window, frame];
    publish(AppEvent::PanelFrameChanged {
        preset: *this.load_ivar::<usize>("_preset"),
        panel: *this.load_ivar::<usize>("_panel"),
        frame: rect_from_ns(frame),
    });
}

unsafe extern "C-unwind" fn window_will_close(_this: &mut AnyObject, _cmd: Sel, notification: id) {
    let window: id = msg_send![notification, object];
    if window == nil {
        return;
    }
    let view: id = msg_send![window, contentView];
    if view != nil {
        teardown_panel_view(view);
    }
}

/// Create and show the window for one panel of a preset.
///
/// # Safety
/// Main thread only.
pub unsafe fn open_panel_window(
    preset: usize,
    panel_index: usize,
    panel: &Panel,
    title: &str,
    opacity: f64,
    dwell_delay: Duration,
    grid_visible: bool,
) -> PanelHandle {
    let ns_panel = get_class("NSPanel");
    let frame = ns_rect(panel.frame());
    let content: NSRect = msg_send![ns_panel, contentRectForFrameRect: frame, styleMask: PANEL_STYLE];

    let window: id = msg_send![ns_panel, alloc];
    let window: id = msg_send![
        window,
        initWithContentRect: content,
        styleMask: PANEL_STYLE,
        backing: 2u64,
        defer: NO
    ];
    let _: () = msg_send![window, setReleasedWhenClosed: NO];
    let _: () = msg_send![window, setTitle: nsstring_id(title)];
    let _: () = msg_send![window, setLevel: PANEL_WINDOW_LEVEL];
    let _: () = msg_send![window, setAlphaValue: opacity];
    let _: () = msg_send![window, setFloatingPanel: YES];
    let _: () = msg_send![window, setBecomesKeyOnlyIfNeeded: YES];
    let _: () = msg_send![window, setHidesOnDeactivate: NO];
    let _: () = msg_send![window, setCollectionBehavior: COLLECTION_BEHAVIOR];
    let _: () = msg_send![window, setPreservesContentDuringLiveResize: NO];
    let zoom: id = msg_send![window, standardWindowButton: ZOOM_BUTTON];
    if zoom != nil {
        let _: () = msg_send![zoom, setHidden: YES];
    }

    let content_view: id = msg_send![window, contentView];
    let bounds: NSRect = msg_send![content_view, bounds];
    let view = create_panel_view(bounds, panel, dwell_delay);
    let _: () = msg_send![window, setContentView: view];
    set_grid_visible(view, grid_visible);

    let delegate: id = msg_send![delegate_class(), new];
    (*delegate).store_ivar::<usize>("_preset", preset);
    (*delegate).store_ivar::<usize>("_panel", panel_index);
    let _: () = msg_send![window, setDelegate: delegate];

    let _: () = msg_send![window, orderFront: nil];
    debug!("opened panel {} of preset {}", panel_index, preset);

    PanelHandle {
        window,
        view,
        delegate,
    }
}

/// Close a panel window and release everything in `handle`.
///
/// # Safety
/// `handle` must come from [`open_panel_window`] and not be used again.
pub unsafe fn close_panel_window(handle: PanelHandle) {
    let _: () = msg_send![handle.window, setDelegate: nil];
    teardown_panel_view(handle.view);
    let _: () = msg_send![handle.window, close];
    let _: () = msg_send![handle.window, release];
    let _: () = msg_send![handle.view, release];
    let _: () = msg_send![handle.delegate, release];
}

/// # Safety
/// Main thread only.
pub unsafe fn set_panel_opacity(handle: &PanelHandle, opacity: f64) {
    let _: () = msg_send![handle.window, setAlphaValue: opacity];
}

/// # Safety
/// Main thread only.
pub unsafe fn set_panel_grid(handle: &PanelHandle, panel: &Panel) {
    set_grid(handle.view, panel.width, panel.height);
}

/// # Safety
/// Main thread only.
pub unsafe fn set_panel_grid_visible(handle: &PanelHandle, visible: bool) {
    set_grid_visible(handle.view, visible);
}
