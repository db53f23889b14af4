//! Content view of a panel window: lays out cell views on the grid and
//! draws grid lines in edit mode.

use std::ffi::c_void;
use std::time::Duration;

use tracing::debug;

use super::cell_view::{create_cell_view, reset_cell_view, teardown_cell_view};
use crate::geometry::{GridLayout, Rect, Size};
use crate::model::Panel;
use crate::platform::macos::app::register_class;
use crate::platform::macos::ffi::bridge::{
    get_class, id, msg_send, ns_rect, sel, AnyObject, Bool, ClassBuilder, NSPoint, NSRect, NSSize,
    ObjectExt, Sel, NO, YES,
};

const CLASS_NAME: &std::ffi::CStr = c"DwellpadPanelView";

// NSViewWidthSizable | NSViewHeightSizable
const AUTORESIZE_FILL: u64 = 2 | 16;

struct PanelLayout {
    cols: u32,
    rows: u32,
    grid_visible: bool,
    /// Cell views with their grid column and row.
    cells: Vec<(id, u32, u32)>,
}

unsafe fn panel_view_class() -> &'static objc2::runtime::AnyClass {
    register_class(CLASS_NAME, "NSView", |builder: &mut ClassBuilder| {
        builder.add_ivar::<*mut c_void>(c"_layout");
        builder.add_method(
            sel!(isFlipped),
            is_flipped as unsafe extern "C-unwind" fn(_, _) -> _,
        );
        builder.add_method(
            sel!(resizeSubviewsWithOldSize:),
            resize_subviews as unsafe extern "C-unwind" fn(_, _, _),
        );
        builder.add_method(
            sel!(drawRect:),
            draw_rect as unsafe extern "C-unwind" fn(_, _, _),
        );
    })
}

unsafe fn layout_of<'a>(view: id) -> Option<&'a mut PanelLayout> {
    let ptr = *(*view).load_ivar::<*mut c_void>("_layout");
    (ptr as *mut PanelLayout).as_mut()
}

/// Create the content view for `panel`, one cell view per action.
///
/// # Safety
/// Main thread only. The caller owns the returned +1 reference.
pub unsafe fn create_panel_view(frame: NSRect, panel: &Panel, dwell_delay: Duration) -> id {
    let view: id = msg_send![panel_view_class(), alloc];
    let view: id = msg_send![view, initWithFrame: frame];
    let _: () = msg_send![view, setAutoresizingMask: AUTORESIZE_FILL];

    let empty = NSRect::new(NSPoint::new(0.0, 0.0), NSSize::new(0.0, 0.0));
    let mut cells = Vec::with_capacity(panel.actions.len());
    for action in &panel.actions {
        let cell = create_cell_view(empty, action, dwell_delay);
        let _: () = msg_send![view, addSubview: cell];
        // The superview keeps the cell alive.
        let _: () = msg_send![cell, release];
        cells.push((cell, action.x, action.y));
    }

    let layout = Box::new(PanelLayout {
        cols: panel.width,
        rows: panel.height,
        grid_visible: false,
        cells,
    });
    (*view).store_ivar::<*mut c_void>("_layout", Box::into_raw(layout) as *mut c_void);

    relayout(view);
    view
}

/// Position every cell on the current grid. Cells outside the grid are
/// hidden and reset so they cannot hold a key.
///
/// # Safety
/// `view` must be a panel view. Main thread only.
pub unsafe fn relayout(view: id) {
    let Some(layout) = layout_of(view) else {
        return;
    };
    let bounds: NSRect = msg_send![view, bounds];
    let grid = GridLayout::new(
        layout.cols,
        layout.rows,
        Size::new(bounds.size.width, bounds.size.height),
    );

    // Inset cells in edit mode so the grid lines stay visible between them.
    let inset = if layout.grid_visible { 1.0 } else { 0.0 };
    for &(cell, col, row) in &layout.cells {
        if grid.contains_cell(col, row) {
            let r = grid.cell_rect(col, row);
            let r = Rect::new(
                r.origin.x + inset,
                r.origin.y + inset,
                (r.size.width - 2.0 * inset).max(0.0),
                (r.size.height - 2.0 * inset).max(0.0),
            );
            let _: () = msg_send![cell, setFrame: ns_rect(r)];
            let _: () = msg_send![cell, setHidden: NO];
        } else {
            reset_cell_view(cell);
            let _: () = msg_send![cell, setHidden: YES];
        }
        let _: () = msg_send![cell, setNeedsDisplay: YES];
    }
    let _: () = msg_send![view, setNeedsDisplay: YES];
}

/// Change the grid size and re-layout.
///
/// # Safety
/// `view` must be a panel view. Main thread only.
pub unsafe fn set_grid(view: id, cols: u32, rows: u32) {
    if let Some(layout) = layout_of(view) {
        debug!("panel grid -> {}x{}", cols, rows);
        layout.cols = cols;
        layout.rows = rows;
    }
    relayout(view);
}

/// # Safety
/// `view` must be a panel view. Main thread only.
pub unsafe fn set_grid_visible(view: id, visible: bool) {
    if let Some(layout) = layout_of(view) {
        layout.grid_visible = visible;
    }
    relayout(view);
}

/// Tear down every cell and free the layout. Idempotent.
///
/// # Safety
/// `view` must be a panel view. Main thread only.
pub unsafe fn teardown_panel_view(view: id) {
    let ptr = *(*view).load_ivar::<*mut c_void>("_layout");
    if ptr.is_null() {
        return;
    }
    (*view).store_ivar::<*mut c_void>("_layout", std::ptr::null_mut());
    let layout = Box::from_raw(ptr as *mut PanelLayout);
    for &(cell, _, _) in &layout.cells {
        teardown_cell_view(cell);
    }
}

unsafe extern "C-unwind" fn is_flipped(_this: &AnyObject, _cmd: Sel) -> Bool {
    Bool::YES
}

unsafe extern "C-unwind" fn resize_subviews(this: &mut AnyObject, _cmd: Sel, _old: NSSize) {
    relayout(this as *mut AnyObject as id);
}

unsafe extern "C-unwind" fn draw_rect(this: &AnyObject, _cmd: Sel, _rect: NSRect) {
    let view = this as *const AnyObject as id;
    let bounds: NSRect = msg_send![view, bounds];
    let ns_color = get_class("NSColor");
    let ns_bezier = get_class("NSBezierPath");

    let background: id = msg_send![ns_color, windowBackgroundColor];
    let _: () = msg_send![background, set];
    let _: () = msg_send![ns_bezier, fillRect: bounds];

    let Some(layout) = layout_of(view) else {
        return;
    };
    if !layout.grid_visible {
        return;
    }

    let grid = GridLayout::new(
        layout.cols,
        layout.rows,
        Size::new(bounds.size.width, bounds.size.height),
    );
    let line_color: id = msg_send![ns_color, lightGrayColor];
    let _: () = msg_send![line_color, set];
    let path: id = msg_send![ns_bezier, bezierPath];
    let _: () = msg_send![path, setLineWidth: 1.0f64];
    for seg in grid
        .vertical_lines()
        .into_iter()
        .chain(grid.horizontal_lines())
    {
        let _: () = msg_send![path, moveToPoint: NSPoint::new(seg.from.x, seg.from.y)];
        let _: () = msg_send![path, lineToPoint: NSPoint::new(seg.to.x, seg.to.y)];
    }
    let _: () = msg_send![path, stroke];
}
