//! Load command - the "Load Face Model" action

use anyhow::{Context, Result, anyhow};
use clap::Args;
use facekit::formats::write_face_model;
use facekit::{FaceModelLoader, Scene};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct LoadArgs {
    /// Directory with the face model files
    pub dir: Option<PathBuf>,

    /// Write the assembled model as .ictface
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file (default: platform config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: LoadArgs) -> Result<()> {
    let config = crate::load_config(args.config.as_deref())?;

    let dir = match args.dir {
        Some(dir) => dir,
        None => match pick_directory()? {
            Some(dir) => dir,
            None => {
                tracing::info!("No directory selected");
                return Ok(());
            }
        },
    };
    tracing::info!("Selected directory: {}", dir.display());

    let mut scene = Scene::new();
    let report = FaceModelLoader::new(config.layout)
        .load(&dir, &mut scene)
        .map_err(|e| anyhow!("Error loading face model: {:#}", anyhow::Error::from(e)))?;

    tracing::info!(
        "Successfully loaded {} expressions and {} identities",
        report.expression_count(),
        report.identity_count()
    );
    println!(
        "Face model loaded successfully with {} expressions and {} identities",
        report.expression_count(),
        report.identity_count()
    );

    if let Some(output) = args.output {
        let face = scene
            .object(report.face_model)
            .context("Face model missing from scene after load")?;
        write_output(&output, face)?;
        println!("Wrote {}", output.display());
    }

    Ok(())
}

fn write_output(path: &Path, face: &facekit::scene::SceneObject) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create output: {:?}", path))?;
    let mut writer = BufWriter::new(file);
    write_face_model(&mut writer, face)
        .with_context(|| format!("Failed to write face model: {:?}", path))?;
    tracing::info!(
        "Wrote {} with {} vertices and {} shape keys",
        path.display(),
        face.mesh.vertex_count(),
        face.shape_keys.len()
    );
    Ok(())
}

#[cfg(feature = "dialog")]
fn pick_directory() -> Result<Option<PathBuf>> {
    tracing::info!("Opening directory chooser");
    Ok(rfd::FileDialog::new()
        .set_title("Choose directory with the face model files")
        .pick_folder())
}

#[cfg(not(feature = "dialog"))]
fn pick_directory() -> Result<Option<PathBuf>> {
    anyhow::bail!("No directory given (built without the directory chooser)")
}
