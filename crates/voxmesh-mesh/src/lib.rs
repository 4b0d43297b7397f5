//! Meshing: face culling, flat normals, and color atlas packing for palette tables.

pub mod atlas;
pub mod face_direction;
pub mod mesher;
pub mod visible_faces;
pub mod voxel_mesh;

pub use atlas::{ColorAtlas, DEFAULT_UV_INSET, atlas_dimensions};
pub use face_direction::{CUBE_CORNERS, FaceDirection};
pub use mesher::{MeshOutput, MesherConfig, generate_mesh};
pub use visible_faces::VisibleFaces;
pub use voxel_mesh::{QuadInfo, VOXEL_HALF_EXTENT, VoxelMesh};
