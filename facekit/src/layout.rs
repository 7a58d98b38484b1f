//! Well-known file names inside a face model directory
//!
//! # Directory layout
//! ```text
//! <dir>/generic_neutral_mesh.obj   required base mesh
//! <dir>/vertex_indices.json        required manifest ("expressions": [...])
//! <dir>/<expression>.obj           optional, one per manifest entry
//! <dir>/identity###.obj            optional, contiguous from identity000
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Base mesh file name
pub const BASE_MESH_FILE: &str = "generic_neutral_mesh.obj";
/// Manifest file name
pub const MANIFEST_FILE: &str = "vertex_indices.json";
/// Name given to the imported base object
pub const FACE_MODEL_NAME: &str = "ICTFaceModel";
/// Identity variant name prefix
pub const IDENTITY_PREFIX: &str = "identity";
/// Zero-pad width of the identity index
pub const IDENTITY_DIGITS: usize = 3;
/// Extension of every variant mesh file
pub const MESH_EXT: &str = "obj";

/// Names used to locate and label everything in a face model directory.
///
/// Defaults match the ICT FaceKit distribution; every field can be
/// overridden from the `[layout]` section of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default = "default_base_mesh_file")]
    pub base_mesh_file: String,
    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,
    #[serde(default = "default_face_model_name")]
    pub face_model_name: String,
    #[serde(default = "default_identity_prefix")]
    pub identity_prefix: String,
    #[serde(default = "default_identity_digits")]
    pub identity_digits: usize,
    #[serde(default = "default_mesh_ext")]
    pub mesh_ext: String,
}

fn default_base_mesh_file() -> String {
    BASE_MESH_FILE.to_string()
}
fn default_manifest_file() -> String {
    MANIFEST_FILE.to_string()
}
fn default_face_model_name() -> String {
    FACE_MODEL_NAME.to_string()
}
fn default_identity_prefix() -> String {
    IDENTITY_PREFIX.to_string()
}
fn default_identity_digits() -> usize {
    IDENTITY_DIGITS
}
fn default_mesh_ext() -> String {
    MESH_EXT.to_string()
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            base_mesh_file: default_base_mesh_file(),
            manifest_file: default_manifest_file(),
            face_model_name: default_face_model_name(),
            identity_prefix: default_identity_prefix(),
            identity_digits: default_identity_digits(),
            mesh_ext: default_mesh_ext(),
        }
    }
}

impl Layout {
    pub fn base_mesh_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.base_mesh_file)
    }

    pub fn manifest_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.manifest_file)
    }

    /// Path of a variant mesh: `<dir>/<name>.<ext>`
    pub fn variant_path(&self, dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{}.{}", name, self.mesh_ext))
    }

    /// Identity name for an index, e.g. `identity007`.
    ///
    /// Indices wider than the pad are printed in full (`identity1000`).
    pub fn identity_name(&self, index: usize) -> String {
        format!(
            "{}{:0width$}",
            self.identity_prefix,
            index,
            width = self.identity_digits
        )
    }

    /// Path for any variant spec
    pub fn spec_path(&self, dir: &Path, spec: &VariantSpec) -> PathBuf {
        match spec.kind {
            VariantKind::Base => self.base_mesh_path(dir),
            VariantKind::Expression | VariantKind::Identity => self.variant_path(dir, &spec.name),
        }
    }
}

/// Role a variant mesh plays in the assembled model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    /// The neutral mesh every other variant is baked onto
    Base,
    /// Manifest-declared expression
    Expression,
    /// Convention-named `identity###` variant
    Identity,
}

/// One candidate mesh to import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSpec {
    /// File stem, and the shape key name once joined
    pub name: String,
    pub kind: VariantKind,
    /// Only the base mesh is required
    pub required: bool,
}

impl VariantSpec {
    pub fn base(layout: &Layout) -> Self {
        Self {
            name: layout.face_model_name.clone(),
            kind: VariantKind::Base,
            required: true,
        }
    }

    pub fn expression(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: VariantKind::Expression,
            required: false,
        }
    }

    pub fn identity(layout: &Layout, index: usize) -> Self {
        Self {
            name: layout.identity_name(index),
            kind: VariantKind::Identity,
            required: false,
        }
    }
}
