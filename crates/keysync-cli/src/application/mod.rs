//! Application layer: the generate use case.

pub mod generate;

pub use generate::{GenerateError, GenerateRequest, DEFAULT_CONFIG_FILE};
