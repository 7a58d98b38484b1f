//! OBJ reading for the scene host
//!
//! Keeps `v` positions in file order and `f` faces as position indices, so
//! that two OBJ exports of the same topology line up vertex for vertex.
//! Texture coordinates, normals, groups and materials are ignored.

use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Positions and polygon faces read from an OBJ file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjMesh {
    pub positions: Vec<[f32; 3]>,
    /// Zero-based position indices, one list per polygon
    pub faces: Vec<Vec<u32>>,
}

impl ObjMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Read an OBJ file from disk
pub fn read_obj(path: &Path) -> Result<ObjMesh> {
    let file = File::open(path).with_context(|| format!("Failed to open OBJ: {:?}", path))?;
    parse_obj(BufReader::new(file)).with_context(|| format!("Failed to parse OBJ: {:?}", path))
}

/// Parse OBJ text
pub fn parse_obj<R: BufRead>(reader: R) -> Result<ObjMesh> {
    let mut mesh = ObjMesh::default();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "v" => {
                if parts.len() < 4 {
                    bail!("line {}: vertex needs 3 coordinates", line_no + 1);
                }
                let mut p = [0.0f32; 3];
                for (axis, value) in parts[1..4].iter().enumerate() {
                    p[axis] = value.parse().with_context(|| {
                        format!("line {}: bad coordinate {:?}", line_no + 1, value)
                    })?;
                }
                mesh.positions.push(p);
            }
            "f" => {
                if parts.len() < 4 {
                    bail!("line {}: face needs at least 3 vertices", line_no + 1);
                }
                let face = parts[1..]
                    .iter()
                    .map(|v| resolve_index(v, mesh.positions.len()))
                    .collect::<Option<Vec<u32>>>()
                    .with_context(|| format!("line {}: bad face {:?}", line_no + 1, line))?;
                mesh.faces.push(face);
            }
            _ => {}
        }
    }

    Ok(mesh)
}

/// Resolve the position part of a face vertex ("v", "v/vt", "v/vt/vn", "v//vn").
///
/// OBJ indices are 1-based; negative indices count back from the last vertex.
fn resolve_index(s: &str, vertex_count: usize) -> Option<u32> {
    let raw: i64 = s.split('/').next()?.parse().ok()?;
    let index = match raw {
        0 => return None,
        i if i > 0 => i - 1,
        i => vertex_count as i64 + i,
    };
    if index < 0 || index as usize >= vertex_count {
        return None;
    }
    u32::try_from(index).ok()
}
