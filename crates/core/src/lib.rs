//! sleuth-core
//!
//! Core library for locating the build of a native product that introduced a
//! source-level regression, driven by crash-report telemetry and published
//! debug-symbol listings.
//!
//! This crate covers:
//! - resolving each build's debug identifier from crash reports (`crashes`)
//! - fetching symbol listings from the symbol store (`fetch`)
//! - bisecting the ordered build series with a marker predicate (`bisect`)
//! - extracting and diffing function records between listings (`symbols`)
//! - persisting intermediate artifacts (`store`)
//! - investigation config and workspace layout (`project`)
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends (CLI, notebooks, etc.).

pub mod model;
pub mod symbols;
pub mod bisect;
pub mod fetch;
pub mod crashes;
pub mod store;
pub mod project;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
