//! Renderers for the three generated artifacts.
//!
//! Each renderer is a pure function of a validated [`KeySet`] and the
//! [`TargetNames`] plugged into the text.  None of them can fail: every
//! naming defect is rejected when the `KeySet` is built.
//!
//! [`Generator`] bundles the two inputs and handles writing to an output
//! stream.  When several artifacts are requested, each one is rendered into
//! its own buffer first and the buffers are written in the requested order,
//! so output is either complete or absent.

use std::fmt;
use std::io::{self, Write};

use tracing::debug;

use crate::keyset::KeySet;

pub mod backward;
pub mod forward;
pub mod proto_enum;

pub use backward::{backward_arm, render_backward, BACKWARD_MARGIN};
pub use forward::{forward_arm, render_forward, FORWARD_MARGIN};
pub use proto_enum::{render_proto_enum, SENTINEL};

/// Names substituted into the generated text.
///
/// The defaults reproduce the fragments used by the `msg` (prost-generated)
/// protocol module and the `rdev` input library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetNames {
    /// Module path of the generated protocol types (`msg`).
    pub protocol_namespace: String,
    /// Protocol enum name (`KeyCode`).
    pub protocol_enum: String,
    /// Path of the tagged payload constructor, relative to the protocol
    /// namespace (`key::Key::Code`).
    pub payload_path: String,
    /// Integer type the tag is cast to inside the payload (`i32`).
    pub cast_type: String,
    /// Module path of the platform library (`rdev`).
    pub platform_namespace: String,
    /// Platform key enum name (`Key`).
    pub platform_enum: String,
    /// Wrapper applied to forward expressions (`Some`); `None` emits the
    /// platform key bare.
    pub forward_wrapper: Option<String>,
}

impl Default for TargetNames {
    fn default() -> Self {
        Self {
            protocol_namespace: "msg".to_string(),
            protocol_enum: "KeyCode".to_string(),
            payload_path: "key::Key::Code".to_string(),
            cast_type: "i32".to_string(),
            platform_namespace: "rdev".to_string(),
            platform_enum: "Key".to_string(),
            forward_wrapper: Some("Some".to_string()),
        }
    }
}

/// One generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// Protocol schema enum block.
    ProtoEnum,
    /// Protocol → platform match arms.
    Forward,
    /// Platform → protocol match arms.
    Backward,
}

impl Artifact {
    /// Every artifact, in the order they are emitted by default.
    pub const ALL: [Artifact; 3] = [Artifact::ProtoEnum, Artifact::Forward, Artifact::Backward];

    /// Short name used on the command line and in logs.
    pub fn name(self) -> &'static str {
        match self {
            Artifact::ProtoEnum => "proto",
            Artifact::Forward => "forward",
            Artifact::Backward => "backward",
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A key set paired with the names it is rendered against.
#[derive(Debug, Clone)]
pub struct Generator {
    keys: KeySet,
    names: TargetNames,
}

impl Generator {
    pub fn new(keys: KeySet, names: TargetNames) -> Self {
        Self { keys, names }
    }

    pub fn keys(&self) -> &KeySet {
        &self.keys
    }

    pub fn names(&self) -> &TargetNames {
        &self.names
    }

    /// Renders one artifact into a string.
    pub fn render_to_string(&self, artifact: Artifact) -> String {
        let out = match artifact {
            Artifact::ProtoEnum => render_proto_enum(&self.keys, &self.names),
            Artifact::Forward => render_forward(&self.keys, &self.names),
            Artifact::Backward => render_backward(&self.keys, &self.names),
        };
        debug!(
            %artifact,
            keys = self.keys.len(),
            bytes = out.len(),
            "artifact rendered"
        );
        out
    }

    /// Renders several artifacts, in order, separated by one blank line.
    pub fn render_many_to_string(&self, artifacts: &[Artifact]) -> String {
        artifacts
            .iter()
            .map(|&a| self.render_to_string(a))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Writes one artifact to `out`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by `out`.
    pub fn render<W: Write + ?Sized>(&self, artifact: Artifact, out: &mut W) -> io::Result<()> {
        self.render_many(&[artifact], out)
    }

    /// Renders every artifact into memory, then writes them to `out` in one
    /// call.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by `out`.
    pub fn render_many<W: Write + ?Sized>(
        &self,
        artifacts: &[Artifact],
        out: &mut W,
    ) -> io::Result<()> {
        let text = self.render_many_to_string(artifacts);
        out.write_all(text.as_bytes())?;
        out.flush()
    }
}
