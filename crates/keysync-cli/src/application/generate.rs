//! Resolve the inputs of one `keysync` run and render the selected artifacts.
//!
//! Resolution order:
//!
//! 1. Config: the explicit `--config` path (must exist), otherwise
//!    [`DEFAULT_CONFIG_FILE`] in the working directory when present,
//!    otherwise the built-in defaults.
//! 2. Key list: the `--keys` file when given (its overrides still come from
//!    the config), otherwise the config's list, otherwise the built-in list.
//!
//! All validation happens here.  Nothing is rendered, and so nothing is
//! written, unless every input is valid.

use std::path::{Path, PathBuf};

use keysync_core::keyset::split_authored;
use keysync_core::{Artifact, ConfigError, Generator, GeneratorConfig, KeySet, KeySetError};
use thiserror::Error;
use tracing::{debug, info};

/// Config file picked up from the working directory when `--config` is not
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "keysync.toml";

/// Errors that abort a run before any output is produced.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The `--keys` file could not be read.
    #[error("I/O error reading key list at {path}: {source}")]
    KeysFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The `--keys` file holds an invalid list.
    #[error("invalid key list in {path}: {source}")]
    Keys {
        path: PathBuf,
        #[source]
        source: KeySetError,
    },
}

/// Inputs of one run, as collected from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateRequest {
    pub config_path: Option<PathBuf>,
    pub keys_path: Option<PathBuf>,
    /// Artifacts in output order.  Empty means all three.
    pub artifacts: Vec<Artifact>,
}

impl GenerateRequest {
    /// The artifacts to render, falling back to [`Artifact::ALL`].
    pub fn selected_artifacts(&self) -> Vec<Artifact> {
        if self.artifacts.is_empty() {
            Artifact::ALL.to_vec()
        } else {
            self.artifacts.clone()
        }
    }

    /// Loads the config this request points at.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Config`] if an explicit config is missing or
    /// any config file is malformed.
    pub fn load_config(&self) -> Result<GeneratorConfig, GenerateError> {
        let cfg = match &self.config_path {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                GeneratorConfig::load(path)?
            }
            None => GeneratorConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?,
        };
        Ok(cfg)
    }

    /// Builds the generator for this request.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerateError`] for unreadable or invalid inputs.
    pub fn build_generator(&self) -> Result<Generator, GenerateError> {
        let cfg = self.load_config()?;
        let names = cfg.target_names()?;
        let keys = match &self.keys_path {
            Some(path) => load_key_file(path, &cfg)?,
            None => cfg.key_set()?,
        };
        info!(keys = keys.len(), "key set ready");
        Ok(Generator::new(keys, names))
    }

    /// Renders the selected artifacts into one string.
    ///
    /// # Errors
    ///
    /// Same as [`GenerateRequest::build_generator`].
    pub fn run(&self) -> Result<String, GenerateError> {
        let generator = self.build_generator()?;
        let artifacts = self.selected_artifacts();
        let text = generator.render_many_to_string(&artifacts);
        let names: Vec<&str> = artifacts.iter().map(|a| a.name()).collect();
        info!(
            artifacts = ?names,
            bytes = text.len(),
            "generation complete"
        );
        Ok(text)
    }
}

/// Reads an authored comma-separated key list, applying the config's
/// overrides.
fn load_key_file(path: &Path, cfg: &GeneratorConfig) -> Result<KeySet, GenerateError> {
    let text = std::fs::read_to_string(path).map_err(|source| GenerateError::KeysFile {
        path: path.to_path_buf(),
        source,
    })?;
    KeySet::with_overrides(split_authored(&text), &cfg.keys.overrides).map_err(|source| {
        GenerateError::Keys {
            path: path.to_path_buf(),
            source,
        }
    })
}
