//! keysync-cli library crate.
//!
//! The `keysync` binary is a thin shell over this library:
//!
//! ```text
//! main.rs          clap arguments, logging setup, exit codes
//!   application/   resolve config + key list, render the selected artifacts
//!   infrastructure/ write the rendered text to stdout or a file
//! ```
//!
//! Keeping the use case here lets it be tested without spawning a process.

/// Application layer: turns a request into rendered text.
pub mod application;

/// Infrastructure layer: output routing.
pub mod infrastructure;
