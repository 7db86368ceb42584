//! salvage-core
//!
//! Recovers image assets embedded as string literals in JavaScript sources.
//!
//! The pipeline parses a source into a literal stream (`extract`), runs each
//! literal through an ordered set of detectors (`classify`), rebuilds
//! standalone files from the matches (`reconstruct`), and persists them per
//! source file (`services::pipeline`). Literals nothing claimed are kept as a
//! triage corpus.
//!
//! All substantive logic lives here so it is testable and reusable from
//! frontends other than the CLI.

pub mod classify;
pub mod config;
pub mod extract;
pub mod layout;
pub mod model;
pub mod reconstruct;
pub mod services;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
