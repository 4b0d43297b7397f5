//! Load a voxel file, mesh every chunk, export atlases, optionally write back.

use std::path::Path;

use voxmesh_config::{Config, MesherSettings};
use voxmesh_mesh::{DEFAULT_UV_INSET, MesherConfig, generate_mesh};
use voxmesh_voxel::{ChunkId, ColorVoxelInfo, Container};

use crate::error::AppError;

/// Per-chunk meshing statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkReport {
    /// Chunk key in the container.
    pub id: ChunkId,
    /// Occupied positions in the combined view.
    pub voxels: usize,
    /// Mesh vertex count.
    pub vertices: usize,
    /// Mesh triangle count.
    pub triangles: usize,
    /// Atlas `(width, height)` in cells.
    pub atlas_size: (u32, u32),
    /// Voxels whose palette id had no payload.
    pub unresolved_voxels: usize,
}

/// Mesher settings as the meshing crate expects them.
///
/// The inset is clamped to `0.0..=1.0`; a non-finite inset falls back to
/// [`DEFAULT_UV_INSET`].
pub fn mesher_config(settings: &MesherSettings) -> MesherConfig {
    let uv_inset = if settings.uv_inset.is_finite() {
        settings.uv_inset.clamp(0.0, 1.0)
    } else {
        tracing::warn!("Ignoring non-finite uv_inset {}", settings.uv_inset);
        DEFAULT_UV_INSET
    };
    MesherConfig {
        uv_inset,
        skip_unresolved: settings.skip_unresolved,
    }
}

/// Runs the whole pipeline on `input`.
///
/// # Errors
///
/// Fails if the file cannot be read, an atlas cannot be saved, or the
/// write-back is refused.
pub fn process_file(input: &Path, config: &Config) -> Result<Vec<ChunkReport>, AppError> {
    let container: Container<ColorVoxelInfo> = voxmesh_format::read_container(input)?;
    let reports = mesh_container(&container, config)?;

    if config.output.write_back {
        voxmesh_format::write_container(input, &container)?;
    }
    Ok(reports)
}

fn mesh_container(
    container: &Container<ColorVoxelInfo>,
    config: &Config,
) -> Result<Vec<ChunkReport>, AppError> {
    let mesher = mesher_config(&config.mesher);

    if let Some(dir) = &config.output.atlas_dir {
        std::fs::create_dir_all(dir).map_err(|source| AppError::CreateDir {
            path: dir.clone(),
            source,
        })?;
    }

    let mut reports = Vec::with_capacity(container.len());
    for (id, entry) in container.iter() {
        let view = entry.chunk.create_combined_view();
        let output = generate_mesh(&view, &mesher);

        let report = ChunkReport {
            id,
            voxels: view.voxel_count(),
            vertices: output.mesh.vertex_count(),
            triangles: output.mesh.triangle_count(),
            atlas_size: (output.atlas.width(), output.atlas.height()),
            unresolved_voxels: output.unresolved_voxels,
        };
        tracing::info!(
            "Chunk {} at {}: {} voxels, {} vertices, {} triangles, atlas {}x{}",
            id,
            entry.properties.offset,
            report.voxels,
            report.vertices,
            report.triangles,
            report.atlas_size.0,
            report.atlas_size.1
        );

        if let Some(dir) = &config.output.atlas_dir {
            let path = dir.join(format!("chunk-{id}.png"));
            output
                .atlas
                .save(&path)
                .map_err(|source| AppError::SaveAtlas {
                    path: path.clone(),
                    source,
                })?;
            tracing::debug!("Saved atlas {}", path.display());
        }

        reports.push(report);
    }
    Ok(reports)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
