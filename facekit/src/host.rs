//! Mesh host services
//!
//! The loader never edits meshes itself. Importing, renaming, selecting,
//! joining variants as shape keys and deleting objects are all delegated to
//! a [`MeshHost`]. [`crate::Scene`] is the in-memory implementation; tests
//! use recording fakes.

use anyhow::Result;
use std::fmt;
use std::path::Path;

/// Opaque handle to an object owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mesh editing services consumed by the face model loader
pub trait MeshHost {
    /// Import a mesh file as a new object.
    ///
    /// `Ok(None)` means the importer ran but produced no object.
    fn import_mesh(&mut self, path: &Path) -> Result<Option<ObjectId>>;

    /// Rename an object, returning the name it actually got
    ///
    /// Hosts with unique names may adjust `name` (e.g. `smile.001`).
    fn rename(&mut self, id: ObjectId, name: &str) -> Result<String>;

    /// Replace the current selection
    fn set_selection(&mut self, ids: &[ObjectId]);

    /// Make an object the active one
    fn set_active(&mut self, id: ObjectId);

    /// Bake each variant into a shape key on `base`, named after the variant object
    fn join_as_shapes(&mut self, base: ObjectId, variants: &[ObjectId]) -> Result<()>;

    /// Remove objects from the host
    fn delete_objects(&mut self, ids: &[ObjectId]) -> Result<()>;
}
