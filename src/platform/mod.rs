//! Platform-specific implementations.
//!
//! Only macOS is supported. Everything outside this module builds and
//! tests on any host.

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "macos")]
pub use macos::*;
