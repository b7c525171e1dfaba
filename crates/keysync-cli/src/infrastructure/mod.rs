//! Infrastructure layer: where generated text ends up.

pub mod output;

pub use output::{OutputError, OutputTarget};
