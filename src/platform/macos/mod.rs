//! macOS implementation using AppKit via objc2.
//!
//! This module contains all macOS-specific code:
//! - FFI helpers over objc2 and the accessibility API
//! - UI components (panels, cells, presets and settings windows)
//! - Input synthesis (Quartz events) and lifecycle observers
//! - The main-thread session and event dispatcher

pub mod app;
pub mod ffi;
pub mod handlers;
pub mod input;
pub mod ui;

pub use app::*;
pub use ffi::bridge;
pub use handlers::*;
pub use ui::*;
