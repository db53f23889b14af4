//! Per-preset editor: +/- controls for each panel's grid width and height.
//!
//! Buttons only publish [`AppEvent::AdjustGrid`]; the value labels are
//! refreshed by the dispatcher once the state has changed.

use crate::events::{publish, AppEvent};
use crate::model::{GridAxis, Preset};
use crate::platform::macos::app::{
    centered_on_main_screen, make_button, make_label, register_class, WindowHandle,
};
use crate::platform::macos::ffi::bridge::{
    get_class, id, msg_send, nil, nsstring_id, sel, AnyObject, NSPoint, NSRect, NSSize, ObjectExt,
    Sel, NO, YES,
};

const EDITOR_CLASS: &std::ffi::CStr = c"DwellpadPresetEditor";

// Titled | Closable | Resizable | UtilityWindow
const EDITOR_STYLE: u64 = 1 | 2 | 8 | 16;

const WINDOW_SIZE: (f64, f64) = (400.0, 300.0);
const ROW_HEIGHT: f64 = 60.0;

/// Value labels are tagged `LABEL_TAG_BASE + panel * 2` (width) and `+ 1`
/// (height).
const LABEL_TAG_BASE: i64 = 1000;

unsafe fn editor_class() -> &'static objc2::runtime::AnyClass {
    register_class(EDITOR_CLASS, "NSObject", |builder| {
        builder.add_ivar::<usize>(c"_preset");
        builder.add_method(
            sel!(incrementWidth:),
            increment_width as unsafe extern "C-unwind" fn(_, _, _),
        );
        builder.add_method(
            sel!(decrementWidth:),
            decrement_width as unsafe extern "C-unwind" fn(_, _, _),
        );
        builder.add_method(
            sel!(incrementHeight:),
            increment_height as unsafe extern "C-unwind" fn(_, _, _),
        );
        builder.add_method(
            sel!(decrementHeight:),
            decrement_height as unsafe extern "C-unwind" fn(_, _, _),
        );
        builder.add_method(
            sel!(windowWillClose:),
            window_will_close as unsafe extern "C-unwind" fn(_, _, _),
        );
    })
}

unsafe fn publish_adjust(this: &AnyObject, sender: id, axis: GridAxis, delta: i32) {
    if sender == nil {
        return;
    }
    let tag: i64 = msg_send![sender, tag];
    let Ok(panel) = usize::try_from(tag) else {
        return;
    };
    publish(AppEvent::AdjustGrid {
        preset: *this.load_ivar::<usize>("_preset"),
        panel,
        axis,
        delta,
    });
}

unsafe extern "C-unwind" fn increment_width(this: &mut AnyObject, _cmd: Sel, sender: id) {
    publish_adjust(this, sender, GridAxis::Width, 1);
}

unsafe extern "C-unwind" fn decrement_width(this: &mut AnyObject, _cmd: Sel, sender: id) {
    publish_adjust(this, sender, GridAxis::Width, -1);
}

unsafe extern "C-unwind" fn increment_height(this: &mut AnyObject, _cmd: Sel, sender: id) {
    publish_adjust(this, sender, GridAxis::Height, 1);
}

unsafe extern "C-unwind" fn decrement_height(this: &mut AnyObject, _cmd: Sel, sender: id) {
    publish_adjust(this, sender, GridAxis::Height, -1);
}

unsafe extern "C-unwind" fn window_will_close(this: &mut AnyObject, _cmd: Sel, _notification: id) {
    publish(AppEvent::EditorClosed(*this.load_ivar::<usize>("_preset")));
}

fn label_tag(panel: usize, axis: GridAxis) -> i64 {
    let offset = match axis {
        GridAxis::Width => 0,
        GridAxis::Height => 1,
    };
    LABEL_TAG_BASE + panel as i64 * 2 + offset
}

unsafe fn add_subview(parent: id, view: id) {
    let _: () = msg_send![parent, addSubview: view];
    let _: () = msg_send![view, release];
}

unsafe fn add_axis_controls(
    parent: id,
    target: id,
    panel: usize,
    axis: GridAxis,
    value: u32,
    y: f64,
) {
    let (title, minus, plus) = match axis {
        GridAxis::Width => ("Width:", sel!(decrementWidth:), sel!(incrementWidth:)),
        GridAxis::Height => ("Height:", sel!(decrementHeight:), sel!(incrementHeight:)),
    };
    let tag = panel as i64;

    add_subview(
        parent,
        make_label(NSRect::new(NSPoint::new(100.0, y + 2.0), NSSize::new(55.0, 20.0)), title),
    );
    add_subview(
        parent,
        make_button(
            NSRect::new(NSPoint::new(160.0, y), NSSize::new(30.0, 24.0)),
            "-",
            target,
            minus,
            tag,
        ),
    );

    let value_label = make_label(
        NSRect::new(NSPoint::new(195.0, y + 2.0), NSSize::new(40.0, 20.0)),
        &value.to_string(),
    );
    // NSTextAlignmentCenter
    let _: () = msg_send![value_label, setAlignment: 1i64];
    let _: () = msg_send![value_label, setTag: label_tag(panel, axis)];
    add_subview(parent, value_label);

    add_subview(
        parent,
        make_button(
            NSRect::new(NSPoint::new(240.0, y), NSSize::new(30.0, 24.0)),
            "+",
            target,
            plus,
            tag,
        ),
    );
}

/// Create and show the editor for `preset`.
///
/// # Safety
/// Main thread only.
pub unsafe fn open_editor(preset_index: usize, preset: &Preset) -> WindowHandle {
    let target: id = msg_send![editor_class(), new];
    (*target).store_ivar::<usize>("_preset", preset_index);

    let (width, height) = WINDOW_SIZE;
    let window: id = msg_send![get_class("NSPanel"), alloc];
    let window: id = msg_send![
        window,
        initWithContentRect: centered_on_main_screen(width, height),
        styleMask: EDITOR_STYLE,
        backing: 2u64,
        defer: NO
    ];
    let _: () = msg_send![window, setReleasedWhenClosed: NO];
    let _: () = msg_send![window, setFloatingPanel: YES];
    let _: () = msg_send![window, setBecomesKeyOnlyIfNeeded: YES];
    let _: () = msg_send![window, setAlphaValue: 0.95f64];
    let title = format!("Configure {}", preset.display_name());
    let _: () = msg_send![window, setTitle: nsstring_id(&title)];

    let content: id = msg_send![window, contentView];
    let bounds: NSRect = msg_send![content, bounds];

    let scroll: id = msg_send![get_class("NSScrollView"), alloc];
    let scroll: id = msg_send![
        scroll,
        initWithFrame: NSRect::new(
            NSPoint::new(20.0, 20.0),
            NSSize::new(bounds.size.width - 40.0, bounds.size.height - 40.0)
        )
    ];
    let _: () = msg_send![scroll, setHasVerticalScroller: YES];
    let _: () = msg_send![scroll, setHasHorizontalScroller: NO];
    // NSBezelBorder
    let _: () = msg_send![scroll, setBorderType: 2u64];
    // NSViewWidthSizable | NSViewHeightSizable
    let _: () = msg_send![scroll, setAutoresizingMask: 18u64];

    let total_height =
        (preset.panels.len() as f64 * ROW_HEIGHT + 20.0).max(bounds.size.height - 40.0);
    let doc: id = msg_send![get_class("NSView"), alloc];
    let doc: id = msg_send![
        doc,
        initWithFrame: NSRect::new(
            NSPoint::new(0.0, 0.0),
            NSSize::new(bounds.size.width - 60.0, total_height)
        )
    ];

    for (i, panel) in preset.panels.iter().enumerate() {
        let y = total_height - (i as f64 + 1.0) * ROW_HEIGHT;
        add_subview(
            doc,
            make_label(
                NSRect::new(NSPoint::new(10.0, y + 20.0), NSSize::new(80.0, 20.0)),
                &format!("Panel {}:", i + 1),
            ),
        );
        add_axis_controls(doc, target, i, GridAxis::Width, panel.width, y + 18.0);
        add_axis_controls(doc, target, i, GridAxis::Height, panel.height, y - 7.0);
    }

    let _: () = msg_send![scroll, setDocumentView: doc];
    let _: () = msg_send![doc, release];
    add_subview(content, scroll);

    let _: () = msg_send![window, setDelegate: target];
    let _: () = msg_send![window, makeKeyAndOrderFront: nil];

    WindowHandle { window, target }
}

/// Update the width/height labels of one panel row.
///
/// # Safety
/// `handle` must come from [`open_editor`]. Main thread only.
pub unsafe fn refresh_editor_row(handle: &WindowHandle, panel: usize, width: u32, height: u32) {
    let content: id = msg_send![handle.window, contentView];
    for (axis, value) in [(GridAxis::Width, width), (GridAxis::Height, height)] {
        let label: id = msg_send![content, viewWithTag: label_tag(panel, axis)];
        if label != nil {
            let _: () = msg_send![label, setStringValue: nsstring_id(&value.to_string())];
        }
    }
}

/// Close the editor without publishing `EditorClosed` and release it.
///
/// # Safety
/// `handle` must come from [`open_editor`] and not be used again.
pub unsafe fn close_editor(handle: WindowHandle) {
    let _: () = msg_send![handle.window, setDelegate: nil];
    let _: () = msg_send![handle.window, close];
    let _: () = msg_send![handle.window, release];
    let _: () = msg_send![handle.target, release];
}
