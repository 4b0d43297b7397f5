//! Per-voxel face-culling mesher with a packed color atlas.
//!
//! Every occupied position becomes a unit cube centered on its coordinates.
//! A face is emitted only when the neighboring position in that direction is
//! unoccupied; coplanar faces are not merged. Each voxel's faces sample the
//! atlas cell holding its payload color.

use glam::Vec2;
use rustc_hash::FxHashMap;
use voxmesh_voxel::{Color, HasColor, PaletteId, PaletteTable, VoxelInfo};

use crate::atlas::{ColorAtlas, DEFAULT_UV_INSET};
use crate::visible_faces::VisibleFaces;
use crate::voxel_mesh::VoxelMesh;

/// Mesher settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MesherConfig {
    /// Inward shrink of each face's UV rectangle, as a fraction of one atlas
    /// cell. `0.0` disables the inset.
    pub uv_inset: f32,
    /// Drop the faces of voxels whose palette id has no payload. When `false`
    /// those faces are still emitted, with all UVs at `(0, 0)`.
    ///
    /// Either way such voxels keep occluding their neighbors.
    pub skip_unresolved: bool,
}

impl Default for MesherConfig {
    fn default() -> Self {
        Self {
            uv_inset: DEFAULT_UV_INSET,
            skip_unresolved: false,
        }
    }
}

/// Mesh buffers plus the atlas their UVs address.
#[derive(Clone, Debug)]
pub struct MeshOutput {
    /// Geometry.
    pub mesh: VoxelMesh,
    /// Packed colors.
    pub atlas: ColorAtlas,
    /// Number of voxels whose palette id had no payload.
    pub unresolved_voxels: usize,
}

/// Meshes a flattened palette table.
///
/// Output ordering follows the table's map iteration order, which is stable
/// for a given table but not specified otherwise.
pub fn generate_mesh<T: VoxelInfo + HasColor>(
    table: &PaletteTable<T>,
    config: &MesherConfig,
) -> MeshOutput {
    let (colors, color_by_palette) = dedup_colors(table);
    let atlas = ColorAtlas::build(colors);

    let mut mesh = VoxelMesh::new();
    let mut unresolved_voxels = 0;

    for (position, palette) in table.voxels() {
        if palette.is_empty() {
            continue;
        }

        let uvs = match color_by_palette.get(&palette) {
            Some(&index) => atlas.cell_uvs(index, config.uv_inset),
            None => {
                unresolved_voxels += 1;
                if config.skip_unresolved {
                    continue;
                }
                [Vec2::ZERO; 4]
            }
        };

        for direction in VisibleFaces::of(table, position).iter() {
            mesh.push_face(direction, position, uvs);
        }
    }

    mesh.recalculate_normals();

    if unresolved_voxels > 0 {
        tracing::warn!(
            "{} voxel(s) reference palette ids with no payload",
            unresolved_voxels
        );
    }
    tracing::debug!(
        "Meshed {} voxels: {} faces, {} vertices, atlas {}x{}",
        table.voxel_count(),
        mesh.quad_count(),
        mesh.vertex_count(),
        atlas.width(),
        atlas.height()
    );

    MeshOutput {
        mesh,
        atlas,
        unresolved_voxels,
    }
}

/// Collects distinct colors in first-encountered palette order and maps each
/// palette id to its color's index.
fn dedup_colors<T: VoxelInfo + HasColor>(
    table: &PaletteTable<T>,
) -> (Vec<Color>, FxHashMap<PaletteId, usize>) {
    let mut colors: Vec<Color> = Vec::new();
    let mut color_by_palette = FxHashMap::default();

    for (palette, info) in table.palette() {
        let color = info.color();
        let index = match colors.iter().position(|&c| c == color) {
            Some(index) => index,
            None => {
                colors.push(color);
                colors.len() - 1
            }
        };
        color_by_palette.insert(palette, index);
    }

    (colors, color_by_palette)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use voxmesh_voxel::{ColorVoxelInfo, Position};

    use super::*;
    use crate::face_direction::FaceDirection;

    fn red() -> ColorVoxelInfo {
        ColorVoxelInfo::new(Color::rgb(1.0, 0.0, 0.0))
    }

    fn table(
        palette: &[(u16, ColorVoxelInfo)],
        voxels: &[(Position, u16)],
    ) -> PaletteTable<ColorVoxelInfo> {
        PaletteTable::new(
            palette.iter().map(|&(id, info)| (PaletteId(id), info)).collect(),
            voxels.iter().map(|&(pos, id)| (pos, PaletteId(id))).collect(),
        )
    }

    #[test]
    fn test_isolated_voxel_has_six_faces() {
        let t = table(&[(1, red())], &[(Position::ZERO, 1)]);
        let out = generate_mesh(&t, &MesherConfig::default());
        assert_eq!(out.mesh.quad_count(), 6);
        assert_eq!(out.mesh.vertex_count(), 24);
        assert_eq!(out.mesh.triangle_count(), 12);
        assert_eq!(out.mesh.uvs.len(), 24);
        assert_eq!(out.mesh.normals.len(), 24);
        for dir in FaceDirection::ALL {
            assert_eq!(out.mesh.count_quads_for_direction(dir), 1);
        }
    }

    #[test]
    fn test_faces_follow_direction_order() {
        let t = table(&[(1, red())], &[(Position::ZERO, 1)]);
        let out = generate_mesh(&t, &MesherConfig::default());
        let dirs: Vec<_> = out.mesh.quads.iter().map(|q| q.direction).collect();
        assert_eq!(dirs, FaceDirection::ALL.to_vec());
    }

    #[test]
    fn test_adjacent_voxels_cull_shared_faces() {
        let t = table(
            &[(1, red())],
            &[(Position::ZERO, 1), (Position::new(0, 1, 0), 1)],
        );
        let out = generate_mesh(&t, &MesherConfig::default());
        assert_eq!(out.mesh.quad_count(), 10);
        assert_eq!(out.mesh.count_quads_for_direction(FaceDirection::PosY), 1);
        assert_eq!(out.mesh.count_quads_for_direction(FaceDirection::NegY), 1);
    }

    #[test]
    fn test_enclosed_voxel_emits_nothing() {
        let mut voxels = vec![(Position::ZERO, 1)];
        for dir in FaceDirection::ALL {
            voxels.extend(dir.offset(Position::ZERO).map(|p| (p, 1)));
        }
        let t = table(&[(1, red())], &voxels);
        let out = generate_mesh(&t, &MesherConfig::default());
        // 6 arms × 5 visible faces each; the center contributes none.
        assert_eq!(out.mesh.quad_count(), 30);
        assert!(out.mesh.quads.iter().all(|q| q.voxel != Position::ZERO));
    }

    #[test]
    fn test_vertices_centered_on_voxel() {
        let p = Position::new(3, -2, 7);
        let t = table(&[(1, red())], &[(p, 1)]);
        let out = generate_mesh(&t, &MesherConfig::default());
        for v in &out.mesh.positions {
            assert!((v.x - 3.0).abs() == 0.5);
            assert!((v.y + 2.0).abs() == 0.5);
            assert!((v.z - 7.0).abs() == 0.5);
        }
    }

    #[test]
    fn test_duplicate_colors_share_atlas_cell() {
        let t = table(
            &[(1, red()), (2, red()), (3, ColorVoxelInfo::new(Color::WHITE))],
            &[(Position::ZERO, 1), (Position::new(5, 0, 0), 2)],
        );
        let out = generate_mesh(&t, &MesherConfig::default());
        assert_eq!(out.atlas.colors().len(), 2);
        assert_eq!((out.atlas.width(), out.atlas.height()), (2, 1));
        // Both voxels sample the same cell.
        let first = out.mesh.quads.iter().position(|q| q.voxel == Position::ZERO).unwrap();
        let second = out
            .mesh
            .quads
            .iter()
            .position(|q| q.voxel == Position::new(5, 0, 0))
            .unwrap();
        assert_eq!(out.mesh.uvs[first * 4], out.mesh.uvs[second * 4]);
    }

    #[test]
    fn test_five_colors_make_four_by_two_atlas() {
        let palette: Vec<_> = (1..=5u16)
            .map(|i| (i, ColorVoxelInfo::new(Color::rgb(i as f32 / 5.0, 0.0, 0.0))))
            .collect();
        let t = table(&palette, &[(Position::ZERO, 3)]);
        let out = generate_mesh(&t, &MesherConfig::default());
        assert_eq!((out.atlas.width(), out.atlas.height()), (4, 2));
    }

    #[test]
    fn test_uvs_address_voxel_color() {
        let t = table(&[(1, red())], &[(Position::ZERO, 1)]);
        let config = MesherConfig {
            uv_inset: 0.0,
            ..MesherConfig::default()
        };
        let out = generate_mesh(&t, &config);
        // 1×1 atlas, no inset: the whole texture.
        assert_eq!(
            &out.mesh.uvs[..4],
            &[
                Vec2::new(0.0, 1.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_unresolved_palette_keeps_geometry_by_default() {
        let t = table(&[(1, red())], &[(Position::ZERO, 1), (Position::new(4, 0, 0), 9)]);
        let out = generate_mesh(&t, &MesherConfig::default());
        assert_eq!(out.unresolved_voxels, 1);
        assert_eq!(out.mesh.quad_count(), 12);
        assert_eq!(out.mesh.uvs.len(), out.mesh.positions.len());
    }

    #[test]
    fn test_unresolved_palette_skipped_when_configured() {
        let t = table(&[(1, red())], &[(Position::ZERO, 1), (Position::new(4, 0, 0), 9)]);
        let config = MesherConfig {
            skip_unresolved: true,
            ..MesherConfig::default()
        };
        let out = generate_mesh(&t, &config);
        assert_eq!(out.unresolved_voxels, 1);
        assert_eq!(out.mesh.quad_count(), 6);
    }

    #[test]
    fn test_empty_palette_id_is_not_a_voxel() {
        let t = table(&[(1, red())], &[(Position::ZERO, 1), (Position::new(1, 0, 0), 0)]);
        let out = generate_mesh(&t, &MesherConfig::default());
        assert_eq!(out.mesh.quad_count(), 6);
        assert_eq!(out.unresolved_voxels, 0);
    }

    #[test]
    fn test_empty_table() {
        let t: PaletteTable<ColorVoxelInfo> = PaletteTable::empty();
        let out = generate_mesh(&t, &MesherConfig::default());
        assert!(out.mesh.is_empty());
        assert_eq!((out.atlas.width(), out.atlas.height()), (1, 1));
    }

    #[test]
    fn test_voxels_at_coordinate_extremes_have_six_faces() {
        let extremes = [
            Position::new(i32::MAX, 0, 0),
            Position::new(i32::MIN, 0, 0),
            Position::new(0, i32::MAX, 0),
            Position::new(0, i32::MIN, 0),
            Position::new(0, 0, i32::MAX),
            Position::new(0, 0, i32::MIN),
        ];
        for position in extremes {
            let t = table(&[(1, red())], &[(position, 1)]);
            let out = generate_mesh(&t, &MesherConfig::default());
            assert_eq!(out.mesh.quad_count(), 6, "voxel at {position}");
            assert!(out.mesh.quads.iter().all(|q| q.voxel == position));
        }
    }
}
