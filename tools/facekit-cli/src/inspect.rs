//! Inspect command - show the contents of an .ictface file

use anyhow::{Context, Result};
use clap::Args;
use facekit::formats::read_face_model;
use std::path::PathBuf;

#[derive(Args)]
pub struct InspectArgs {
    /// Packed face model (.ictface)
    pub input: PathBuf,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let model = read_face_model(&bytes)
        .with_context(|| format!("Failed to decode {}", args.input.display()))?;

    println!("{}", args.input.display());
    println!("  vertices: {}", model.positions.len());
    println!("  faces:    {}", model.faces.len());
    println!("  shapes:   {}", model.shapes.len());
    for shape in &model.shapes {
        println!("    {}", shape.name);
    }
    Ok(())
}
