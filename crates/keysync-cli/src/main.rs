//! keysync — prints the generated key-mapping fragments.
//!
//! # Usage
//!
//! ```text
//! keysync [OPTIONS] [ARTIFACT]...
//!
//! Artifacts (default: all three, in this order):
//!   proto      protocol enum block
//!   forward    protocol → platform match arms
//!   backward   platform → protocol match arms
//!
//! Options:
//!   -c, --config <PATH>  TOML config [env: KEYSYNC_CONFIG]
//!   -k, --keys <PATH>    comma-separated key list replacing the configured one
//!   -o, --output <PATH>  write to a file instead of stdout
//! ```
//!
//! Logs go to stderr (`RUST_LOG` controls the level) so stdout can be
//! redirected straight into a source file.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::error;
use tracing_subscriber::EnvFilter;

use keysync_cli::application::GenerateRequest;
use keysync_cli::infrastructure::OutputTarget;
use keysync_core::Artifact;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Generate the protocol enum and dispatch arms from one key list.
#[derive(Debug, Parser)]
#[command(name = "keysync", version)]
struct Cli {
    /// Artifacts to print, in order.
    #[arg(value_enum)]
    artifacts: Vec<ArtifactArg>,

    /// TOML config naming the namespaces, enums and key list.
    ///
    /// When omitted, `keysync.toml` in the working directory is used if it
    /// exists.
    #[arg(short, long, env = "KEYSYNC_CONFIG")]
    config: Option<PathBuf>,

    /// Authored comma-separated key list; replaces the configured list.
    #[arg(short, long)]
    keys: Option<PathBuf>,

    /// Write to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Command-line names of the artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ArtifactArg {
    /// Protocol enum block.
    Proto,
    /// Protocol → platform match arms.
    Forward,
    /// Platform → protocol match arms.
    Backward,
}

impl From<ArtifactArg> for Artifact {
    fn from(arg: ArtifactArg) -> Self {
        match arg {
            ArtifactArg::Proto => Artifact::ProtoEnum,
            ArtifactArg::Forward => Artifact::Forward,
            ArtifactArg::Backward => Artifact::Backward,
        }
    }
}

impl Cli {
    fn into_parts(self) -> (GenerateRequest, OutputTarget) {
        let request = GenerateRequest {
            config_path: self.config,
            keys_path: self.keys,
            artifacts: self.artifacts.into_iter().map(Artifact::from).collect(),
        };
        (request, OutputTarget::from_option(self.output))
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn run(cli: Cli) -> anyhow::Result<()> {
    let (request, target) = cli.into_parts();
    let text = request.run().context("generation failed")?;
    target.write(&text).context("could not write output")?;
    Ok(())
}

fn main() -> ExitCode {
    // Stdout carries the generated text, so logs must go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
