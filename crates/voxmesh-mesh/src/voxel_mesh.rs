//! Mesh buffers produced by the mesher.

use glam::{Vec2, Vec3};
use voxmesh_voxel::Position;

use crate::face_direction::FaceDirection;

/// Half the edge length of a voxel cube.
pub const VOXEL_HALF_EXTENT: f32 = 0.5;

/// Metadata for a single emitted face, used for analysis and debugging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuadInfo {
    /// Which face direction this quad belongs to.
    pub direction: FaceDirection,
    /// The voxel the face belongs to.
    pub voxel: Position,
}

/// Vertex, UV, normal and index buffers ready for upload by a rendering host.
///
/// Faces never share vertices, so `positions`, `uvs` and `normals` always have
/// the same length (four entries per face).
#[derive(Clone, Debug, Default)]
pub struct VoxelMesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Per-vertex flat normals.
    pub normals: Vec<Vec3>,
    /// Per-vertex atlas coordinates.
    pub uvs: Vec<Vec2>,
    /// Triangle list, 3 indices per triangle.
    pub indices: Vec<u32>,
    /// One entry per emitted face.
    pub quads: Vec<QuadInfo>,
}

impl VoxelMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one face of the voxel at `voxel`: four new vertices and the two
    /// triangles `[0, 1, 2]` and `[0, 2, 3]`.
    pub fn push_face(&mut self, direction: FaceDirection, voxel: Position, uvs: [Vec2; 4]) {
        let center = Vec3::new(voxel.x as f32, voxel.y as f32, voxel.z as f32);
        let base = self.positions.len() as u32;

        self.positions
            .extend(direction.face_vertices(center, VOXEL_HALF_EXTENT));
        self.uvs.extend(uvs);
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        self.quads.push(QuadInfo { direction, voxel });
    }

    /// Rebuilds `normals` from the triangle winding.
    ///
    /// Each vertex gets the normalized sum of the face normals of the triangles
    /// that reference it, which is the flat face normal since faces don't share
    /// vertices.
    pub fn recalculate_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for triangle in self.indices.chunks_exact(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
            let normal = (self.positions[b] - self.positions[a])
                .cross(self.positions[c] - self.positions[a]);
            normals[a] += normal;
            normals[b] += normal;
            normals[c] += normal;
        }
        self.normals = normals.into_iter().map(Vec3::normalize_or_zero).collect();
    }

    /// Number of emitted faces.
    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Counts the faces emitted for a specific direction.
    pub fn count_quads_for_direction(&self, direction: FaceDirection) -> usize {
        self.quads
            .iter()
            .filter(|q| q.direction == direction)
            .count()
    }

    /// Returns `true` if no faces were emitted.
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }
}
