//! FaceKit CLI - load face model directories
//!
//! # Commands
//!
//! - `facekit load [DIR]` - Load a face model and report its blendshapes (main command)
//! - `facekit check DIR` - Validate a face model directory without importing
//! - `facekit inspect FILE` - Show the contents of a packed .ictface file
//!
//! # Usage
//!
//! ```bash
//! # Pick the directory in a native dialog
//! facekit load
//!
//! # Load and write the assembled model
//! facekit load ~/ICT-FaceKit/FaceXModel -o face.ictface
//! ```

mod check;
mod inspect;
mod load;

use anyhow::Result;
use clap::{Parser, Subcommand};
use facekit::FaceKitConfig;
use std::path::Path;

/// FaceKit CLI - load face models with blendshapes
#[derive(Parser)]
#[command(name = "facekit")]
#[command(about = "Load face model directories as a single mesh with blendshapes")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a face model directory (opens a directory chooser when DIR is omitted)
    Load(load::LoadArgs),

    /// Validate a face model directory without importing anything
    Check(check::CheckArgs),

    /// Show header and shape keys of an .ictface file
    Inspect(inspect::InspectArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Load(args) => load::execute(args),
        Commands::Check(args) => check::execute(args),
        Commands::Inspect(args) => inspect::execute(args),
    }
}

/// Explicit `--config` file, or the user config (defaults when absent)
fn load_config(path: Option<&Path>) -> Result<FaceKitConfig> {
    match path {
        Some(path) => {
            tracing::debug!("Using config {}", path.display());
            facekit::config::load_from(path)
        }
        None => Ok(facekit::config::load()),
    }
}
