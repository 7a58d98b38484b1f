//! FaceKit - face model loading
//!
//! Turns a directory holding a neutral face mesh, a `vertex_indices.json`
//! manifest and a set of variant meshes (named expressions plus numbered
//! identities) into a single mesh carrying one shape key per variant.
//!
//! The mesh-editing side is abstracted behind [`MeshHost`]; [`Scene`] is the
//! in-memory host used by the `facekit` CLI.

pub mod config;
pub mod error;
pub mod formats;
pub mod host;
pub mod layout;
pub mod manifest;
pub mod pipeline;
pub mod scene;

pub use config::FaceKitConfig;
pub use error::{ErrorKind, LoadError, ManifestError};
pub use host::{MeshHost, ObjectId};
pub use layout::{Layout, VariantKind, VariantSpec};
pub use manifest::{Manifest, read_manifest};
pub use pipeline::{FaceModelLoader, LoadReport, PipelineStage, load_face_model};
pub use scene::Scene;
