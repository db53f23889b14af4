//! Main-thread application session.
//!
//! AppKit callbacks only publish events; the dispatcher is the single place
//! that borrows the session to reduce state and track native windows.

use std::cell::RefCell;
use std::collections::BTreeMap;

use tracing::warn;

use crate::model::AppState;
use crate::platform::macos::ffi::bridge::id;
use crate::storage::{persist_all, AppPaths};

/// Native objects of one open panel.
#[derive(Debug, Clone, Copy)]
pub struct PanelHandle {
    pub window: id,
    pub view: id,
    pub delegate: id,
}

/// A window plus the controller object receiving its actions.
#[derive(Debug, Clone, Copy)]
pub struct WindowHandle {
    pub window: id,
    pub target: id,
}

pub struct Session {
    pub state: AppState,
    pub paths: AppPaths,
    /// Open panels keyed by preset index.
    pub panels: BTreeMap<usize, Vec<PanelHandle>>,
    /// Preset editors keyed by preset index.
    pub editors: BTreeMap<usize, WindowHandle>,
    /// Created on first use, then shown and hidden.
    pub global_config: Option<WindowHandle>,
    /// Toggle buttons of the presets window, by preset index.
    pub toggles: Vec<id>,
}

impl Session {
    pub fn new(state: AppState, paths: AppPaths) -> Self {
        Self {
            state,
            paths,
            panels: BTreeMap::new(),
            editors: BTreeMap::new(),
            global_config: None,
            toggles: Vec::new(),
        }
    }
}

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
}

pub fn install(session: Session) {
    SESSION.with(|s| *s.borrow_mut() = Some(session));
}

/// Run `f` with the session. Returns `None` before `install` or when called
/// re-entrantly from inside another `with_session`.
pub fn with_session<R>(f: impl FnOnce(&mut Session) -> R) -> Option<R> {
    SESSION.with(|cell| match cell.try_borrow_mut() {
        Ok(mut guard) => guard.as_mut().map(f),
        Err(_) => {
            warn!("session already borrowed, skipping re-entrant access");
            None
        }
    })
}

/// Write presets and config to disk.
pub fn persist() {
    with_session(|s| persist_all(&s.state, &s.paths));
}
