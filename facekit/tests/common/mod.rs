//! Test face directory generation
//!
//! Writes a neutral quad mesh plus variants that shift every vertex along Y,
//! so each shape key is easy to recognize.

#![allow(dead_code)]

use std::fmt::Write as _;
use std::fs;
use tempfile::TempDir;

/// Neutral mesh vertices
pub const BASE_QUAD: [[f32; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
];

/// OBJ text for the quad with every vertex moved by `dy`
pub fn quad_obj(dy: f32) -> String {
    let mut obj = String::from("# facekit test quad\n");
    for [x, y, z] in BASE_QUAD {
        let _ = writeln!(obj, "v {} {} {}", x, y + dy, z);
    }
    obj.push_str("f 1 2 3 4\n");
    obj
}

pub struct FaceDirBuilder {
    manifest: Option<String>,
    base: bool,
    files: Vec<(String, String)>,
}

impl FaceDirBuilder {
    pub fn new() -> Self {
        Self {
            manifest: None,
            base: true,
            files: Vec::new(),
        }
    }

    pub fn manifest(mut self, json: &str) -> Self {
        self.manifest = Some(json.to_string());
        self
    }

    pub fn without_base(mut self) -> Self {
        self.base = false;
        self
    }

    /// `<name>.obj` as the quad shifted by `dy`
    pub fn variant(mut self, name: &str, dy: f32) -> Self {
        self.files.push((format!("{name}.obj"), quad_obj(dy)));
        self
    }

    pub fn raw(mut self, file: &str, content: &str) -> Self {
        self.files.push((file.to_string(), content.to_string()));
        self
    }

    pub fn build(self) -> TempDir {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        if self.base {
            fs::write(dir.path().join("generic_neutral_mesh.obj"), quad_obj(0.0))
                .expect("Failed to write base mesh");
        }
        if let Some(manifest) = self.manifest {
            fs::write(dir.path().join("vertex_indices.json"), manifest)
                .expect("Failed to write manifest");
        }
        for (file, content) in self.files {
            fs::write(dir.path().join(file), content).expect("Failed to write variant");
        }
        dir
    }
}
