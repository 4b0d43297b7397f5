//! Text writer. Serializes each chunk's combined view.

use std::path::Path;

use serde::Serialize;
use voxmesh_voxel::{Container, VoxelInfo};

use crate::error::FormatError;
use crate::{CHUNK_MARKER, FORMAT_VERSION, PALETTE_MARKER};

/// Writes `container` over the existing file at `path`.
///
/// The destination must already exist and the container must hold at least
/// one chunk; both are checked before anything is written.
///
/// # Errors
///
/// Returns [`FormatError::EmptyPath`], [`FormatError::DestinationMissing`] or
/// [`FormatError::NoChunks`] when a precondition fails, and
/// [`FormatError::Encode`] / [`FormatError::Write`] on failure.
pub fn write_container<T>(path: &Path, container: &Container<T>) -> Result<(), FormatError>
where
    T: VoxelInfo + Serialize,
{
    if path.as_os_str().is_empty() {
        tracing::warn!("Refusing to write voxel data: path is empty");
        return Err(FormatError::EmptyPath);
    }
    if !path.exists() {
        tracing::warn!("Refusing to write voxel data: {} not found", path.display());
        return Err(FormatError::DestinationMissing(path.to_path_buf()));
    }
    if container.is_empty() {
        tracing::warn!("Refusing to write voxel data: container has no chunks");
        return Err(FormatError::NoChunks);
    }

    let text = serialize_container(container)?;
    std::fs::write(path, text).map_err(|source| FormatError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Wrote {} chunk(s) to {}", container.len(), path.display());
    Ok(())
}

/// Renders `container` in the current format version.
///
/// Palette lines are sorted by id and voxel lines by position so that output
/// is reproducible. Chunks whose combined view is empty are omitted.
///
/// # Errors
///
/// Returns [`FormatError::Encode`] if a header or payload fails to encode.
pub fn serialize_container<T>(container: &Container<T>) -> Result<String, FormatError>
where
    T: VoxelInfo + Serialize,
{
    let mut out = format!("{FORMAT_VERSION}\n");

    for (id, entry) in container.iter() {
        let view = entry.chunk.create_combined_view();
        if view.is_empty() {
            tracing::debug!("Chunk {} is empty, not written", id);
            continue;
        }

        let header = serde_json::to_string(&entry.properties).map_err(|source| {
            FormatError::Encode {
                what: "chunk properties",
                source,
            }
        })?;
        out.push(CHUNK_MARKER);
        out.push_str(&header);
        out.push('\n');

        let mut palette: Vec<_> = view.palette().collect();
        palette.sort_unstable_by_key(|&(palette, _)| palette);
        for (palette, info) in palette {
            let json = serde_json::to_string(info).map_err(|source| FormatError::Encode {
                what: "voxel payload",
                source,
            })?;
            out.push_str(&format!("{PALETTE_MARKER}{palette},{json}\n"));
        }

        let mut voxels: Vec<_> = view.voxels().collect();
        voxels.sort_unstable();
        for (position, palette) in voxels {
            out.push_str(&format!(
                "{},{},{},{}\n",
                position.x, position.y, position.z, palette
            ));
        }
    }

    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashMap;
    use voxmesh_voxel::{
        Chunk, ChunkProperties, Color, ColorVoxelInfo, PaletteId, PaletteTable, Position,
    };

    use super::*;

    fn red() -> ColorVoxelInfo {
        ColorVoxelInfo::new(Color::rgb(1.0, 0.0, 0.0))
    }

    fn chunk(voxels: &[(i32, i32, i32)]) -> Chunk<ColorVoxelInfo> {
        let mut infos = FxHashMap::default();
        infos.insert(PaletteId(1), red());
        let positions = voxels
            .iter()
            .map(|&p| (Position::from(p), PaletteId(1)))
            .collect();
        Chunk::from_table(PaletteTable::new(infos, positions))
    }

    #[test]
    fn test_serialized_layout() {
        let mut container = Container::new();
        container.add_chunk(
            chunk(&[(1, 0, 0), (0, 0, 0)]),
            ChunkProperties::new(Position::new(4, 0, 0), Position::ZERO),
        );
        let text = serialize_container(&container).unwrap();
        let expected = concat!(
            "1\n",
            r#"!{"offset":{"x":4,"y":0,"z":0},"rotation":{"x":0,"y":0,"z":0}}"#,
            "\n",
            r#"#1,{"color":{"r":1.0,"g":0.0,"b":0.0,"a":1.0}}"#,
            "\n",
            "0,0,0,1\n",
            "1,0,0,1\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_overrides_are_written() {
        let mut c = chunk(&[(0, 0, 0)]);
        let blue = ColorVoxelInfo::new(Color::rgb(0.0, 0.0, 1.0));
        c.set_override(Position::new(0, 1, 0), &blue).unwrap();
        let container = Container::from_chunks([(c, ChunkProperties::default())]);

        let text = serialize_container(&container).unwrap();
        assert!(text.contains("#2,"));
        assert!(text.contains("\n0,1,0,2\n"));
    }

    #[test]
    fn test_empty_chunk_is_omitted() {
        let mut container = Container::new();
        container.add_chunk(
            Chunk::from_table(PaletteTable::empty()),
            ChunkProperties::default(),
        );
        container.add_chunk(chunk(&[(0, 0, 0)]), ChunkProperties::default());
        let text = serialize_container(&container).unwrap();
        assert_eq!(text.matches(CHUNK_MARKER).count(), 1);
    }

    #[test]
    fn test_missing_destination_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.vox");
        let container = Container::from_chunks([(chunk(&[(0, 0, 0)]), ChunkProperties::default())]);
        let result = write_container(&path, &container);
        assert!(matches!(result, Err(FormatError::DestinationMissing(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_empty_container_refused_without_touching_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keep.vox");
        std::fs::write(&path, "original").unwrap();
        let container: Container<ColorVoxelInfo> = Container::new();
        let result = write_container(&path, &container);
        assert!(matches!(result, Err(FormatError::NoChunks)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn test_empty_path_refused() {
        let container = Container::from_chunks([(chunk(&[(0, 0, 0)]), ChunkProperties::default())]);
        let result = write_container(Path::new(""), &container);
        assert!(matches!(result, Err(FormatError::EmptyPath)));
    }
}
