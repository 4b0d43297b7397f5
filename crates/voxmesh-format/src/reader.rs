//! Text reader with version gate, upgrade chain, and line-level recovery.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use voxmesh_voxel::{Chunk, ChunkProperties, Container, PaletteId, PaletteTable, Position, VoxelInfo};

use crate::error::FormatError;
use crate::upgrade::upgrade_to_current;
use crate::{CHUNK_MARKER, FORMAT_VERSION, PALETTE_MARKER};

/// Reads a container from the file at `path`.
///
/// # Errors
///
/// Returns a [`FormatError`] if the file is missing, unreadable, empty, or has
/// an invalid or unsupported version header. Malformed body lines are skipped.
pub fn read_container<T>(path: &Path) -> Result<Container<T>, FormatError>
where
    T: VoxelInfo + DeserializeOwned,
{
    if !path.exists() {
        tracing::warn!("Voxel file does not exist: {}", path.display());
        return Err(FormatError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| FormatError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let container = parse_container(&content).inspect_err(|e| {
        tracing::warn!("Rejected voxel file {}: {}", path.display(), e);
    })?;
    tracing::info!(
        "Loaded {} chunk(s) from {}",
        container.len(),
        path.display()
    );
    Ok(container)
}

/// Parses a container from in-memory text.
///
/// # Errors
///
/// See [`read_container`].
pub fn parse_container<T>(content: &str) -> Result<Container<T>, FormatError>
where
    T: VoxelInfo + DeserializeOwned,
{
    if content.is_empty() {
        return Err(FormatError::Empty);
    }

    let version = parse_version(content)?;
    let content = upgrade_to_current(content, version);

    let mut accumulator = ChunkAccumulator::new();
    for (index, raw) in content.lines().enumerate().skip(1) {
        accumulator.consume(index + 1, raw.trim());
    }
    Ok(Container::from_chunks(accumulator.finish()))
}

/// Parses and range-checks the header line.
pub fn parse_version(content: &str) -> Result<u32, FormatError> {
    let header = content.lines().next().map(str::trim).unwrap_or_default();
    if header.is_empty() {
        return Err(FormatError::MissingVersion);
    }

    let version: i64 = header
        .parse()
        .map_err(|_| FormatError::InvalidVersion(header.to_string()))?;

    match u32::try_from(version) {
        Ok(v) if v <= FORMAT_VERSION => Ok(v),
        _ => Err(FormatError::VersionOutOfRange {
            found: version,
            supported: FORMAT_VERSION,
        }),
    }
}

/// Collects one chunk's maps at a time and emits finished chunks.
struct ChunkAccumulator<T: VoxelInfo> {
    properties: ChunkProperties,
    info_by_palette: FxHashMap<PaletteId, T>,
    palette_by_position: FxHashMap<Position, PaletteId>,
    chunks: Vec<(Chunk<T>, ChunkProperties)>,
}

impl<T: VoxelInfo + DeserializeOwned> ChunkAccumulator<T> {
    fn new() -> Self {
        Self {
            properties: ChunkProperties::default(),
            info_by_palette: FxHashMap::default(),
            palette_by_position: FxHashMap::default(),
            chunks: Vec::new(),
        }
    }

    fn consume(&mut self, line_number: usize, line: &str) {
        if line.is_empty() {
            return;
        }

        if let Some(header) = line.strip_prefix(CHUNK_MARKER) {
            self.flush();
            self.properties = serde_json::from_str(header).unwrap_or_else(|e| {
                tracing::warn!(
                    "line {}: unreadable chunk properties ({}), using defaults",
                    line_number,
                    e
                );
                ChunkProperties::default()
            });
        } else if let Some(entry) = line.strip_prefix(PALETTE_MARKER) {
            match parse_palette_line::<T>(entry) {
                Some((palette, info)) => {
                    if self.info_by_palette.insert(palette, info).is_some() {
                        tracing::debug!("line {}: palette {} redefined", line_number, palette);
                    }
                }
                None => tracing::debug!("line {}: skipped malformed palette entry", line_number),
            }
        } else {
            match parse_voxel_line(line) {
                Some((position, palette)) => {
                    self.palette_by_position.insert(position, palette);
                }
                None => tracing::debug!("line {}: skipped malformed voxel entry", line_number),
            }
        }
    }

    /// Turns the accumulated maps into a chunk unless both are empty.
    fn flush(&mut self) {
        if self.info_by_palette.is_empty() && self.palette_by_position.is_empty() {
            return;
        }
        let table = PaletteTable::new(
            std::mem::take(&mut self.info_by_palette),
            std::mem::take(&mut self.palette_by_position),
        );
        self.chunks.push((Chunk::from_table(table), self.properties));
    }

    fn finish(mut self) -> Vec<(Chunk<T>, ChunkProperties)> {
        self.flush();
        self.chunks
    }
}

/// Parses `id,payloadJSON`. The reserved empty id is rejected.
fn parse_palette_line<T: DeserializeOwned>(entry: &str) -> Option<(PaletteId, T)> {
    let (id, json) = entry.split_once(',')?;
    let palette = PaletteId(id.trim().parse().ok()?);
    if palette.is_empty() {
        return None;
    }
    let info = serde_json::from_str(json).ok()?;
    Some((palette, info))
}

/// Parses `x,y,z,id`. Any other field count is rejected.
fn parse_voxel_line(line: &str) -> Option<(Position, PaletteId)> {
    let mut fields = line.split(',').map(str::trim);
    let x = fields.next()?.parse().ok()?;
    let y = fields.next()?.parse().ok()?;
    let z = fields.next()?.parse().ok()?;
    let palette = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some((Position::new(x, y, z), PaletteId(palette)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
