//! # keysync-core
//!
//! Generates the source fragments that keep a wire-protocol key enumeration
//! and a platform input-library key enumeration in lock-step.
//!
//! Everything is derived from one ordered list of key identifiers:
//!
//! - **`keyset`** – The canonical list, the two naming transforms applied
//!   to every entry, and the validation that rejects naming collisions before
//!   any output exists.
//!
//! - **`render`** – Three pure, single-pass renderers: the protocol enum
//!   definition, the protocol → platform match arms, and the platform →
//!   protocol match arms.
//!
//! - **`config`** – The TOML schema that names the namespaces, enum names and
//!   cast type plugged into the generated text.
//!
//! The crate never translates a key at runtime.  It only prints text that is
//! pasted into (or compiled alongside) the code that does.

pub mod config;
pub mod keyset;
pub mod render;

pub use config::{ConfigError, GeneratorConfig};
pub use keyset::{KeyEntry, KeyForms, KeySet, KeySetError};
pub use render::{Artifact, Generator, TargetNames};
