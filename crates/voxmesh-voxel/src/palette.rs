//! Palette tables: the canonical snapshot of a voxel volume.
//!
//! A [`PaletteTable`] maps small [`PaletteId`] values to payloads and maps
//! positions to palette ids, so many positions can share one stored payload.
//! Tables are built once (by the codec or by a chunk merge) and not mutated
//! after being shared.

use rustc_hash::FxHashMap;

use crate::info::VoxelInfo;
use crate::position::{PaletteId, Position};

/// Palette-indexed sparse voxel volume.
///
/// A position mapped to an id missing from the palette is treated as having no
/// payload. A position mapped to [`PaletteId::EMPTY`] is treated as absent.
#[derive(Clone, Debug, PartialEq)]
pub struct PaletteTable<T> {
    info_by_palette: FxHashMap<PaletteId, T>,
    palette_by_position: FxHashMap<Position, PaletteId>,
}

impl<T: VoxelInfo> PaletteTable<T> {
    /// Creates a table from its two maps.
    pub fn new(
        info_by_palette: FxHashMap<PaletteId, T>,
        palette_by_position: FxHashMap<Position, PaletteId>,
    ) -> Self {
        Self {
            info_by_palette,
            palette_by_position,
        }
    }

    /// Creates a table with no palette entries and no voxels.
    pub fn empty() -> Self {
        Self::new(FxHashMap::default(), FxHashMap::default())
    }

    /// Creates a table with a palette but no voxels.
    pub fn with_palette(info_by_palette: FxHashMap<PaletteId, T>) -> Self {
        Self::new(info_by_palette, FxHashMap::default())
    }

    /// Returns the payload registered under `palette`.
    pub fn get_info(&self, palette: PaletteId) -> Option<&T> {
        self.info_by_palette.get(&palette)
    }

    /// Returns the first palette id whose payload equals `info`.
    ///
    /// Linear in palette size.
    pub fn get_palette_for_info(&self, info: &T) -> Option<PaletteId> {
        self.info_by_palette
            .iter()
            .find(|(_, candidate)| *candidate == info)
            .map(|(&palette, _)| palette)
    }

    /// Returns the lowest id `>= 1` that has no payload.
    ///
    /// Saturates at `u16::MAX`; callers minting ids must check the result is
    /// actually free.
    pub fn get_unused_palette_id(&self) -> PaletteId {
        let mut palette = PaletteId(1);
        while self.info_by_palette.contains_key(&palette) {
            match palette.next() {
                Some(next) => palette = next,
                None => break,
            }
        }
        palette
    }

    /// Returns the palette id stored at `position`, or [`PaletteId::EMPTY`].
    pub fn palette_at(&self, position: Position) -> PaletteId {
        self.palette_by_position
            .get(&position)
            .copied()
            .unwrap_or(PaletteId::EMPTY)
    }

    /// Resolves the payload stored at `position`.
    pub fn payload_at(&self, position: Position) -> Option<&T> {
        self.get_info(self.palette_at(position))
    }

    /// Returns `true` if a non-empty palette id is stored at `position`.
    pub fn is_occupied(&self, position: Position) -> bool {
        !self.palette_at(position).is_empty()
    }

    /// Returns `true` if `palette` has a payload.
    pub fn contains_palette(&self, palette: PaletteId) -> bool {
        self.info_by_palette.contains_key(&palette)
    }

    /// Number of palette entries.
    pub fn palette_len(&self) -> usize {
        self.info_by_palette.len()
    }

    /// Number of position entries.
    pub fn voxel_count(&self) -> usize {
        self.palette_by_position.len()
    }

    /// Returns `true` when both maps are empty.
    pub fn is_empty(&self) -> bool {
        self.info_by_palette.is_empty() && self.palette_by_position.is_empty()
    }

    /// Iterates over `(id, payload)` palette entries.
    pub fn palette(&self) -> impl Iterator<Item = (PaletteId, &T)> {
        self.info_by_palette.iter().map(|(&id, info)| (id, info))
    }

    /// Iterates over `(position, id)` voxel entries.
    pub fn voxels(&self) -> impl Iterator<Item = (Position, PaletteId)> + '_ {
        self.palette_by_position.iter().map(|(&pos, &id)| (pos, id))
    }

    /// Read access to the palette map.
    pub fn info_by_palette(&self) -> &FxHashMap<PaletteId, T> {
        &self.info_by_palette
    }

    /// Read access to the position map.
    pub fn palette_by_position(&self) -> &FxHashMap<Position, PaletteId> {
        &self.palette_by_position
    }

    /// Returns `true` if both tables map the same positions to equal payloads.
    ///
    /// Palette ids themselves may differ.
    pub fn same_voxels(&self, other: &Self) -> bool {
        self.voxel_count() == other.voxel_count()
            && self.voxels().all(|(pos, _)| {
                other.palette_by_position.contains_key(&pos)
                    && self.payload_at(pos) == other.payload_at(pos)
            })
    }
}

impl<T: VoxelInfo> Default for PaletteTable<T> {
    fn default() -> Self {
        Self::empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
