//! Check command - validate a face model directory without importing

use anyhow::{Context, Result, bail};
use clap::Args;
use facekit::{Layout, LoadError, VariantSpec, read_manifest};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct CheckArgs {
    /// Directory with the face model files
    pub dir: PathBuf,

    /// Config file (default: platform config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: CheckArgs) -> Result<()> {
    let config = crate::load_config(args.config.as_deref())?;
    let layout = &config.layout;
    let dir = args.dir.as_path();

    check_required(dir, layout)?;
    let manifest = read_manifest(&layout.manifest_path(dir))
        .map_err(LoadError::from)
        .context("Invalid face model directory")?;

    let mut found = 0usize;
    for name in &manifest.expressions {
        let spec = VariantSpec::expression(name.as_str());
        if layout.spec_path(dir, &spec).exists() {
            found += 1;
        } else {
            println!("  missing expression: {}", name);
        }
    }

    // Same contiguous scan the loader performs
    let identities = (0usize..)
        .map(|index| VariantSpec::identity(layout, index))
        .take_while(|spec| layout.spec_path(dir, spec).exists())
        .count();

    println!(
        "{}: {} of {} expressions present, {} identities",
        dir.display(),
        found,
        manifest.expressions.len(),
        identities
    );

    if found == 0 && identities == 0 {
        bail!(LoadError::NoMorphTargets);
    }
    Ok(())
}

fn check_required(dir: &Path, layout: &Layout) -> Result<()> {
    let err = if !dir.is_dir() {
        LoadError::InvalidDirectory(dir.to_path_buf())
    } else if !layout.base_mesh_path(dir).exists() {
        LoadError::MissingBaseMesh(layout.base_mesh_path(dir))
    } else if !layout.manifest_path(dir).exists() {
        LoadError::MissingManifest(layout.manifest_path(dir))
    } else {
        return Ok(());
    };
    Err(err).context("Invalid face model directory")
}
