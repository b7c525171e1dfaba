//! TOML configuration for the generator.
//!
//! Every field is optional.  An empty file (or no file at all) reproduces the
//! fragments for the `msg` protocol module and the `rdev` input library over
//! the built-in key list:
//!
//! ```toml
//! [protocol]
//! namespace = "msg"
//! enum_name = "KeyCode"
//! payload_path = "key::Key::Code"
//! cast_type = "i32"
//!
//! [platform]
//! namespace = "rdev"
//! enum_name = "Key"
//! forward_wrapper = "Some"   # "" emits the platform key bare
//!
//! [keys]
//! list = ["Escape", "KeyA", "Space"]
//!
//! [keys.overrides]
//! KpReturn = "KpEnter"
//! ```
//!
//! `keys.overrides` maps a canonical identifier to the platform library's
//! name for it.  Only listed keys are affected; there is no implicit
//! exception table.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keyset::{KeySet, KeySetError};
use crate::render::TargetNames;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A name that is spliced into generated code is empty or malformed.
    #[error("invalid setting {field}: {value:?} ({reason})")]
    InvalidSetting {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    /// The configured key list is invalid.
    #[error(transparent)]
    Keys(#[from] KeySetError),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub protocol: ProtocolConfig,
    #[serde(default)]
    pub platform: PlatformConfig,
    #[serde(default)]
    pub keys: KeysConfig,
}

/// Names on the wire-protocol side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProtocolConfig {
    #[serde(default = "default_protocol_namespace")]
    pub namespace: String,
    #[serde(default = "default_protocol_enum")]
    pub enum_name: String,
    #[serde(default = "default_payload_path")]
    pub payload_path: String,
    #[serde(default = "default_cast_type")]
    pub cast_type: String,
}

/// Names on the platform input-library side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlatformConfig {
    #[serde(default = "default_platform_namespace")]
    pub namespace: String,
    #[serde(default = "default_platform_enum")]
    pub enum_name: String,
    /// Empty string disables the wrapper.
    #[serde(default = "default_forward_wrapper")]
    pub forward_wrapper: String,
}

/// The key list and its platform-name overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeysConfig {
    /// Canonical identifiers in tag order.  The built-in list is used when
    /// absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<String>>,
    /// Canonical identifier → platform name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, String>,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_protocol_namespace() -> String {
    "msg".to_string()
}
fn default_protocol_enum() -> String {
    "KeyCode".to_string()
}
fn default_payload_path() -> String {
    "key::Key::Code".to_string()
}
fn default_cast_type() -> String {
    "i32".to_string()
}
fn default_platform_namespace() -> String {
    "rdev".to_string()
}
fn default_platform_enum() -> String {
    "Key".to_string()
}
fn default_forward_wrapper() -> String {
    "Some".to_string()
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            namespace: default_protocol_namespace(),
            enum_name: default_protocol_enum(),
            payload_path: default_payload_path(),
            cast_type: default_cast_type(),
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            namespace: default_platform_namespace(),
            enum_name: default_platform_enum(),
            forward_wrapper: default_forward_wrapper(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl GeneratorConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML is malformed.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if the TOML is malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` if it exists, returning the default config otherwise.
    ///
    /// # Errors
    ///
    /// Same as [`GeneratorConfig::load`], except that a missing file is not
    /// an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Validates and converts the naming settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSetting`] for an empty or malformed
    /// name.
    pub fn target_names(&self) -> Result<TargetNames, ConfigError> {
        let names = TargetNames {
            protocol_namespace: check_path("protocol.namespace", &self.protocol.namespace)?,
            protocol_enum: check_path("protocol.enum_name", &self.protocol.enum_name)?,
            payload_path: check_path("protocol.payload_path", &self.protocol.payload_path)?,
            cast_type: check_path("protocol.cast_type", &self.protocol.cast_type)?,
            platform_namespace: check_path("platform.namespace", &self.platform.namespace)?,
            platform_enum: check_path("platform.enum_name", &self.platform.enum_name)?,
            forward_wrapper: match self.platform.forward_wrapper.trim() {
                "" => None,
                wrapper => Some(check_path("platform.forward_wrapper", wrapper)?),
            },
        };
        Ok(names)
    }

    /// Builds the configured key set, or the built-in one when no list is
    /// configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Keys`] if the list or its overrides are
    /// invalid.
    pub fn key_set(&self) -> Result<KeySet, ConfigError> {
        let set = match &self.keys.list {
            Some(list) => KeySet::with_overrides(list, &self.keys.overrides)?,
            None if self.keys.overrides.is_empty() => KeySet::builtin(),
            None => KeySet::with_overrides(
                crate::keyset::BUILTIN_KEYS.iter().copied(),
                &self.keys.overrides,
            )?,
        };
        Ok(set)
    }
}

/// Accepts a Rust path such as `msg`, `key::Key::Code` or `i32`.
fn check_path(field: &'static str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    let invalid = |reason| ConfigError::InvalidSetting {
        field,
        value: value.to_string(),
        reason,
    };
    if value.is_empty() {
        return Err(invalid("must not be empty"));
    }
    for segment in value.split("::") {
        let mut chars = segment.chars();
        let starts_ok = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if !starts_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid("must be a `::`-separated path of identifiers"));
        }
    }
    Ok(value.to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
