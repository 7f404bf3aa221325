//! Growable vertex and index buffers produced by terrain and tree meshing.

use glam::Vec3;

use crate::error::MeshError;
use crate::vertex::{FLOATS_PER_VERTEX, TerrainVertex};

/// Interleaved vertices plus a triangle-list index buffer.
///
/// Every index refers to a vertex in this buffer and the index count is
/// always a multiple of three when built through the push methods.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffer {
    /// Vertex buffer.
    pub vertices: Vec<TerrainVertex>,
    /// Index buffer (triangles, 3 indices per triangle).
    pub indices: Vec<u32>,
}

impl MeshBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with room for the given element counts.
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Pushes one flat-shaded triangle.
    ///
    /// Three fresh vertices are appended so the triangle never shares a
    /// vertex (or a colour) with its neighbours.
    pub fn push_triangle(&mut self, corners: [Vec3; 3], color: Vec3) {
        let base = self.vertices.len() as u32;
        self.vertices
            .extend(corners.iter().map(|&p| TerrainVertex::new(p, color)));
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    /// Appends an indexed sub-mesh, rebasing its indices onto this buffer.
    pub fn append_indexed(&mut self, vertices: &[TerrainVertex], indices: &[u32]) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);
        self.indices.extend(indices.iter().map(|&i| base + i));
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of indices.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns `true` if the buffer holds no geometry.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Flat `[x, y, z, r, g, b, ...]` view of the vertex buffer.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw vertex bytes for GPU upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for GPU upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Checks that the index buffer forms whole triangles and stays in range.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle {
                index_count: self.indices.len(),
            });
        }
        let vertex_count = self.vertices.len();
        if let Some((position, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &i)| i as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange {
                position,
                index,
                vertex_count,
            });
        }
        Ok(())
    }

    /// Iterates triangles as corner-vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = [TerrainVertex; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ]
        })
    }
}

/// Size in bytes of one vertex in [`MeshBuffer::vertex_bytes`].
pub const VERTEX_STRIDE: usize = FLOATS_PER_VERTEX * std::mem::size_of::<f32>();
