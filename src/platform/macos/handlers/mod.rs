//! Event handlers and dispatching.
//!
//! This module contains the dispatcher that drains the event bus and runs
//! the reducer's UI commands against AppKit.

pub mod dispatcher;

pub use dispatcher::dispatch_events;
