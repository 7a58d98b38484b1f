//! In-memory mesh host
//!
//! A minimal scene graph that implements [`MeshHost`]: objects are imported
//! from OBJ files, carry unique names, and can receive shape keys from other
//! objects with the same vertex count.

mod obj;

pub use obj::{ObjMesh, parse_obj, read_obj};

use anyhow::{Result, bail};
use hashbrown::HashMap;
use std::path::Path;

use crate::host::{MeshHost, ObjectId};

/// Name of the reference key added before the first joined shape
pub const BASIS_KEY_NAME: &str = "Basis";

/// A named set of absolute vertex positions
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeKey {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
}

/// Mesh object held by a [`Scene`]
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub mesh: ObjMesh,
    /// Basis first, then one key per joined variant
    pub shape_keys: Vec<ShapeKey>,
    pub selected: bool,
}

impl SceneObject {
    pub fn shape_key(&self, name: &str) -> Option<&ShapeKey> {
        self.shape_keys.iter().find(|k| k.name == name)
    }

    pub fn shape_key_names(&self) -> impl Iterator<Item = &str> {
        self.shape_keys.iter().map(|k| k.name.as_str())
    }
}

#[derive(Debug, Default)]
pub struct Scene {
    objects: HashMap<ObjectId, SceneObject>,
    next_id: u32,
    active: Option<ObjectId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, obj)| obj.name == name)
            .map(|(id, _)| *id)
    }

    /// Object ids in creation order
    pub fn ids(&self) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self.objects.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Selected object ids in creation order
    pub fn selected(&self) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self
            .objects
            .iter()
            .filter(|(_, obj)| obj.selected)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    pub fn active(&self) -> Option<ObjectId> {
        self.active
    }

    /// Add a mesh as a new, solely selected, active object
    pub fn add_object(&mut self, name: &str, mesh: ObjMesh) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;

        let name = self.unique_name(name, None);
        for obj in self.objects.values_mut() {
            obj.selected = false;
        }
        self.objects.insert(
            id,
            SceneObject {
                name,
                mesh,
                shape_keys: Vec::new(),
                selected: true,
            },
        );
        self.active = Some(id);
        id
    }

    fn get(&self, id: ObjectId) -> Result<&SceneObject> {
        match self.objects.get(&id) {
            Some(obj) => Ok(obj),
            None => bail!("No object {} in scene", id),
        }
    }

    /// `name`, or `name.001`, `name.002`, ... if another object holds it
    fn unique_name(&self, name: &str, owner: Option<ObjectId>) -> String {
        let taken = |candidate: &str| {
            self.objects
                .iter()
                .any(|(id, obj)| Some(*id) != owner && obj.name == candidate)
        };

        if !taken(name) {
            return name.to_string();
        }
        (1u32..)
            .map(|n| format!("{}.{:03}", name, n))
            .find(|candidate| !taken(candidate))
            .unwrap_or_else(|| name.to_string())
    }
}

impl MeshHost for Scene {
    fn import_mesh(&mut self, path: &Path) -> Result<Option<ObjectId>> {
        let mesh = read_obj(path)?;
        if mesh.is_empty() {
            tracing::warn!("No vertices in {:?}, nothing imported", path);
            return Ok(None);
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Mesh".to_string());
        tracing::debug!(
            "Imported {:?}: {} vertices, {} faces",
            path,
            mesh.vertex_count(),
            mesh.faces.len()
        );
        Ok(Some(self.add_object(&name, mesh)))
    }

    fn rename(&mut self, id: ObjectId, name: &str) -> Result<String> {
        self.get(id)?;
        let name = self.unique_name(name, Some(id));
        if let Some(obj) = self.objects.get_mut(&id) {
            obj.name = name.clone();
        }
        Ok(name)
    }

    fn set_selection(&mut self, ids: &[ObjectId]) {
        for (id, obj) in self.objects.iter_mut() {
            obj.selected = ids.contains(id);
        }
    }

    fn set_active(&mut self, id: ObjectId) {
        if self.objects.contains_key(&id) {
            self.active = Some(id);
        }
    }

    fn join_as_shapes(&mut self, base: ObjectId, variants: &[ObjectId]) -> Result<()> {
        let base_count = self.get(base)?.mesh.vertex_count();

        let mut keys = Vec::with_capacity(variants.len());
        let mut mismatched = 0usize;
        for &id in variants {
            if id == base {
                continue;
            }
            let variant = self.get(id)?;
            if variant.mesh.vertex_count() != base_count {
                tracing::warn!(
                    "{} has {} vertices, {} expected; not joined",
                    variant.name,
                    variant.mesh.vertex_count(),
                    base_count
                );
                mismatched += 1;
                continue;
            }
            keys.push(ShapeKey {
                name: variant.name.clone(),
                positions: variant.mesh.positions.clone(),
            });
        }

        let Some(target) = self.objects.get_mut(&base) else {
            bail!("No object {} in scene", base);
        };
        if target.shape_keys.is_empty() {
            target.shape_keys.push(ShapeKey {
                name: BASIS_KEY_NAME.to_string(),
                positions: target.mesh.positions.clone(),
            });
        }
        target.shape_keys.extend(keys);

        if mismatched > 0 {
            tracing::warn!(
                "{} objects do not have the same number of vertices as {}",
                mismatched,
                target.name
            );
        }
        Ok(())
    }

    fn delete_objects(&mut self, ids: &[ObjectId]) -> Result<()> {
        for &id in ids {
            self.get(id)?;
        }
        for id in ids {
            self.objects.remove(id);
            if self.active == Some(*id) {
                self.active = None;
            }
        }
        Ok(())
    }
}
