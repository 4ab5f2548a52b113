//! Mesh view of the height grid for the rendering side.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use super::grid::HeightGrid;

/// GPU-ready terrain vertex (24 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Vertices with smooth normals plus the shared triangle indices.
#[derive(Debug, Clone)]
pub struct TerrainMesh {
    pub vertices: Vec<TerrainVertex>,
    pub indices: Arc<[u32]>,
}

impl TerrainMesh {
    /// Build the mesh for the grid's current elevations.
    ///
    /// Normals are the normalized sum of adjacent face normals. The
    /// triangulation winds counter-clockwise seen from above, so
    /// `(b - a) x (c - a)` points up on flat ground.
    pub fn from_grid(grid: &HeightGrid) -> Self {
        let count = grid.samples().len();
        let positions: Vec<Vec3> = (0..count).map(|i| grid.position(i)).collect();
        let mut normals = vec![Vec3::ZERO; count];

        let indices = grid.shared_triangles();
        for tri in indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }

        let vertices = positions
            .iter()
            .zip(&normals)
            .map(|(p, n)| TerrainVertex {
                position: p.to_array(),
                normal: n.try_normalize().unwrap_or(Vec3::Y).to_array(),
            })
            .collect();

        Self { vertices, indices }
    }

    /// Vertex data as raw bytes for buffer upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes for buffer upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
