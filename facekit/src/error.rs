//! Error types for manifest reading and face model loading
//!
//! Every error is fatal to the load that produced it; nothing is retried.
//! Per-variant failures inside the expression and identity scans are logged
//! and skipped, they never surface here.

use std::path::PathBuf;

/// Coarse classification of a fatal load error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing directory or required file
    NotFound,
    /// Manifest missing, unreadable, empty or malformed
    Config,
    /// Base mesh import failed or produced nothing
    Import,
    /// Neither expressions nor identities could be imported
    NoMorphTargets,
    /// Host failed while joining shapes or deleting variant objects
    Assembly,
}

/// Manifest (vertex_indices.json) read failure
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Cannot find config file: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in config file: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Empty configuration file")]
    Empty,

    #[error("Configuration file does not declare \"expressions\"")]
    MissingExpressions,

    #[error("\"expressions\" must be a list of names: {0}")]
    InvalidExpressions(String),
}

impl ManifestError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Config
    }
}

/// Fatal face model load failure
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Invalid directory path: {}", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("Cannot find neutral mesh: {}", .0.display())]
    MissingBaseMesh(PathBuf),

    #[error("Cannot find config file: {}", .0.display())]
    MissingManifest(PathBuf),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Error importing neutral mesh: {0}")]
    Import(String),

    #[error("No valid morph targets found in directory")]
    NoMorphTargets,

    #[error("Failed to create blendshapes: {0}")]
    Assembly(String),
}

impl LoadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoadError::InvalidDirectory(_)
            | LoadError::MissingBaseMesh(_)
            | LoadError::MissingManifest(_) => ErrorKind::NotFound,
            LoadError::Manifest(e) => e.kind(),
            LoadError::Import(_) => ErrorKind::Import,
            LoadError::NoMorphTargets => ErrorKind::NoMorphTargets,
            LoadError::Assembly(_) => ErrorKind::Assembly,
        }
    }
}
