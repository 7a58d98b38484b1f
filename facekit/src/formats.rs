//! Packed face model format (.ictface)
//!
//! The assembled face model: neutral positions, polygon faces and one delta
//! block per shape key. POD format - no magic bytes, little-endian.
//!
//! # Layout
//! ```text
//! 0x00: vertex_count u32
//! 0x04: face_count u32
//! 0x08: shape_count u32 (Basis not counted)
//! 0x0C: reserved u32
//! 0x10: base positions (vertex_count * f32x3)
//! var:  faces, each: corner_count u32, corner_count * u32 indices
//! var:  shapes, each: name_len u16, name (UTF-8), vertex_count * f32x3 deltas
//! ```

use anyhow::{Context, Result, bail};
use bytemuck::{Pod, Zeroable, cast_slice};
use std::io::Write;

use crate::scene::{BASIS_KEY_NAME, SceneObject};

/// File extension for packed face models
pub const FACE_MODEL_EXT: &str = "ictface";

/// Face model header (16 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct FaceModelHeader {
    pub vertex_count: u32,
    pub face_count: u32,
    pub shape_count: u32,
    pub _reserved: u32,
}

impl FaceModelHeader {
    pub const SIZE: usize = 16;

    pub fn new(vertex_count: u32, face_count: u32, shape_count: u32) -> Self {
        Self {
            vertex_count,
            face_count,
            shape_count,
            _reserved: 0,
        }
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.vertex_count.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.face_count.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.shape_count.to_le_bytes());
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        let word =
            |i: usize| u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);
        Some(Self {
            vertex_count: word(0),
            face_count: word(4),
            shape_count: word(8),
            _reserved: 0,
        })
    }
}

/// A shape key as stored on disk: offsets from the neutral positions
#[derive(Debug, Clone, PartialEq)]
pub struct PackedShape {
    pub name: String,
    pub deltas: Vec<[f32; 3]>,
}

/// Decoded .ictface contents
#[derive(Debug, Clone, PartialEq)]
pub struct PackedFaceModel {
    pub positions: Vec<[f32; 3]>,
    pub faces: Vec<Vec<u32>>,
    pub shapes: Vec<PackedShape>,
}

/// Write a scene object and its shape keys as an .ictface file
pub fn write_face_model<W: Write>(w: &mut W, object: &SceneObject) -> Result<()> {
    let positions = &object.mesh.positions;
    let basis = object
        .shape_key(BASIS_KEY_NAME)
        .map(|k| k.positions.as_slice())
        .unwrap_or(positions.as_slice());
    let shapes: Vec<_> = object
        .shape_keys
        .iter()
        .filter(|k| k.name != BASIS_KEY_NAME)
        .collect();

    let header = FaceModelHeader::new(
        u32::try_from(positions.len()).context("Too many vertices")?,
        u32::try_from(object.mesh.faces.len()).context("Too many faces")?,
        u32::try_from(shapes.len()).context("Too many shape keys")?,
    );
    w.write_all(&header.to_bytes())?;
    w.write_all(cast_slice(positions.as_slice()))?;

    for face in &object.mesh.faces {
        w.write_all(&(face.len() as u32).to_le_bytes())?;
        w.write_all(cast_slice(face.as_slice()))?;
    }

    for shape in shapes {
        if shape.positions.len() != positions.len() {
            bail!(
                "Shape key '{}' has {} vertices, mesh has {}",
                shape.name,
                shape.positions.len(),
                positions.len()
            );
        }
        let name = shape.name.as_bytes();
        let name_len = u16::try_from(name.len())
            .with_context(|| format!("Shape key name too long: {}", shape.name))?;
        w.write_all(&name_len.to_le_bytes())?;
        w.write_all(name)?;

        let deltas: Vec<[f32; 3]> = shape
            .positions
            .iter()
            .zip(basis)
            .map(|(p, b)| [p[0] - b[0], p[1] - b[1], p[2] - b[2]])
            .collect();
        w.write_all(cast_slice(deltas.as_slice()))?;
    }

    Ok(())
}

/// Decode an .ictface file
pub fn read_face_model(bytes: &[u8]) -> Result<PackedFaceModel> {
    let header =
        FaceModelHeader::from_bytes(bytes).context("Face model data too small for header")?;
    let mut reader = ByteReader {
        bytes,
        pos: FaceModelHeader::SIZE,
    };

    let vertex_count = header.vertex_count as usize;
    let positions = reader.vec3s(vertex_count).context("Truncated positions")?;

    // Counts come from the file; never reserve more than the remaining bytes can hold
    let mut faces = Vec::with_capacity((header.face_count as usize).min(reader.remaining() / 4));
    for i in 0..header.face_count {
        let corners = reader.u32().with_context(|| format!("Truncated face {}", i))? as usize;
        let mut face = Vec::with_capacity(corners.min(reader.remaining() / 4));
        for _ in 0..corners {
            face.push(reader.u32().with_context(|| format!("Truncated face {}", i))?);
        }
        faces.push(face);
    }

    let min_shape_len = vertex_count.saturating_mul(12).saturating_add(2);
    let mut shapes =
        Vec::with_capacity((header.shape_count as usize).min(reader.remaining() / min_shape_len));
    for i in 0..header.shape_count {
        let name_len = reader.u16().with_context(|| format!("Truncated shape {}", i))? as usize;
        let name = reader
            .take(name_len)
            .with_context(|| format!("Truncated shape {}", i))?;
        let name = String::from_utf8(name.to_vec())
            .with_context(|| format!("Shape {} name is not UTF-8", i))?;
        let deltas = reader
            .vec3s(vertex_count)
            .with_context(|| format!("Truncated deltas for shape '{}'", name))?;
        shapes.push(PackedShape { name, deltas });
    }

    Ok(PackedFaceModel {
        positions,
        faces,
        shapes,
    })
}

struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(len)?;
        let slice = self.bytes.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }

    fn u16(&mut self) -> Option<u16> {
        self.take(2).map(|b| u16::from_le_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Option<u32> {
        self.take(4)
            .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn vec3s(&mut self, count: usize) -> Option<Vec<[f32; 3]>> {
        let data = self.take(count.checked_mul(12)?)?;
        Some(
            data.chunks_exact(12)
                .map(|c| {
                    let f = |i: usize| f32::from_le_bytes([c[i], c[i + 1], c[i + 2], c[i + 3]]);
                    [f(0), f(4), f(8)]
                })
                .collect(),
        )
    }
}
