//! Output routing for generated text.
//!
//! The text is fully rendered before it reaches this module, so a file
//! target is only created or replaced once generation has succeeded.

use std::io::{self, Write};
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

/// Error type for writing generated text.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Writing to standard output failed.
    #[error("failed to write to stdout: {0}")]
    Stdout(#[source] io::Error),

    /// Writing the output file failed.
    #[error("failed to write {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where the generated text goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// `Some(path)` → file, `None` → stdout.
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(OutputTarget::Stdout, OutputTarget::File)
    }

    /// Writes `text` to the target in one piece.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] if the write fails.
    pub fn write(&self, text: &str) -> Result<(), OutputError> {
        match self {
            OutputTarget::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout
                    .write_all(text.as_bytes())
                    .and_then(|()| stdout.flush())
                    .map_err(OutputError::Stdout)
            }
            OutputTarget::File(path) => {
                std::fs::write(path, text).map_err(|source| OutputError::File {
                    path: path.clone(),
                    source,
                })?;
                info!(path = %path.display(), bytes = text.len(), "output written");
                Ok(())
            }
        }
    }
}
