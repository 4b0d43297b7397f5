use std::path::PathBuf;

use voxmesh_format::{FormatError, read_container, write_container};
use voxmesh_voxel::{
    Chunk, ChunkProperties, Color, ColorVoxelInfo, Container, PaletteTable, Position,
};

fn red() -> ColorVoxelInfo {
    ColorVoxelInfo::new(Color::rgb(1.0, 0.0, 0.0))
}

fn green() -> ColorVoxelInfo {
    ColorVoxelInfo::new(Color::rgba(0.0, 1.0, 0.0, 0.5))
}

fn touch(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, "").unwrap();
    path
}

fn sample_chunk() -> Chunk<ColorVoxelInfo> {
    let mut chunk = Chunk::from_table(PaletteTable::empty());
    chunk
        .set_overrides(
            &[Position::new(0, 0, 0), Position::new(1, 0, 0), Position::new(0, 1, 0)],
            &red(),
        )
        .unwrap();
    chunk
}

#[test]
fn test_write_then_read_preserves_voxels() {
    let dir = tempfile::tempdir().unwrap();
    let path = touch(&dir, "scene.vox");

    let mut container = Container::new();
    container.add_chunk(
        sample_chunk(),
        ChunkProperties::new(Position::new(16, 0, -16), Position::new(0, 90, 0)),
    );
    write_container(&path, &container).unwrap();

    let loaded: Container<ColorVoxelInfo> = read_container(&path).unwrap();
    assert_eq!(loaded.len(), 1);
    let (_, original) = container.iter().next().unwrap();
    let (_, restored) = loaded.iter().next().unwrap();
    assert_eq!(restored.properties, original.properties);
    assert!(
        restored
            .chunk
            .create_combined_view()
            .same_voxels(&original.chunk.create_combined_view())
    );
}

#[test]
fn test_overrides_survive_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = touch(&dir, "edited.vox");

    let mut chunk = sample_chunk();
    chunk.set_override(Position::new(1, 0, 0), &green()).unwrap();
    chunk.set_override(Position::new(5, 5, 5), &green()).unwrap();
    let container = Container::from_chunks([(chunk, ChunkProperties::default())]);
    write_container(&path, &container).unwrap();

    let loaded: Container<ColorVoxelInfo> = read_container(&path).unwrap();
    let (_, entry) = loaded.iter().next().unwrap();
    assert_eq!(entry.chunk.get_info_at(Position::new(1, 0, 0)), Some(&green()));
    assert_eq!(entry.chunk.get_info_at(Position::new(5, 5, 5)), Some(&green()));
    assert_eq!(entry.chunk.get_info_at(Position::new(0, 0, 0)), Some(&red()));
    assert!(!entry.chunk.has_overrides());
}

#[test]
fn test_multiple_chunks_keep_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = touch(&dir, "multi.vox");

    let mut container = Container::new();
    for x in 0..3 {
        container.add_chunk(
            sample_chunk(),
            ChunkProperties::new(Position::new(x * 8, 0, 0), Position::ZERO),
        );
    }
    write_container(&path, &container).unwrap();

    let loaded: Container<ColorVoxelInfo> = read_container(&path).unwrap();
    let offsets: Vec<i32> = loaded.iter().map(|(_, e)| e.properties.offset.x).collect();
    assert_eq!(offsets, vec![0, 8, 16]);
}

#[test]
fn test_empty_chunks_are_dropped_on_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = touch(&dir, "sparse.vox");

    let mut container = Container::new();
    container.add_chunk(Chunk::from_table(PaletteTable::empty()), ChunkProperties::default());
    container.add_chunk(sample_chunk(), ChunkProperties::default());
    write_container(&path, &container).unwrap();

    let loaded: Container<ColorVoxelInfo> = read_container(&path).unwrap();
    assert_eq!(loaded.len(), 1);
}

#[test]
fn test_write_refuses_missing_destination() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.vox");
    let container = Container::from_chunks([(sample_chunk(), ChunkProperties::default())]);

    let err = write_container(&path, &container).unwrap_err();
    assert!(matches!(err, FormatError::DestinationMissing(_)));
    assert!(!path.exists());
}

#[test]
fn test_write_refuses_empty_container() {
    let dir = tempfile::tempdir().unwrap();
    let path = touch(&dir, "untouched.vox");
    let container: Container<ColorVoxelInfo> = Container::new();

    let err = write_container(&path, &container).unwrap_err();
    assert!(matches!(err, FormatError::NoChunks));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
}
