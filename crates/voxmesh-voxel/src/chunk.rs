//! Override-layered chunk over a shared template table.
//!
//! A [`Chunk`] never mutates its template. Per-voxel changes land in a sparse
//! override layer that shadows the template on every read, and
//! [`Chunk::create_combined_view`] flattens both layers into a standalone
//! [`PaletteTable`] for meshing and serialization.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::info::VoxelInfo;
use crate::listeners::{ListenerId, Listeners};
use crate::palette::PaletteTable;
use crate::position::{PaletteId, Position};

/// Errors raised while applying overrides.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    /// Every non-zero palette id is already in use.
    #[error("chunk palette is full (max {} ids)", u16::MAX)]
    PaletteFull,
}

/// One spatial unit of voxel storage with its own override layer.
pub struct Chunk<T: VoxelInfo> {
    template: Arc<PaletteTable<T>>,
    /// Payloads that exist only in the override layer. Allocated on first use.
    override_info_by_palette: Option<FxHashMap<PaletteId, T>>,
    /// Allocated on first override.
    override_palette_by_position: Option<FxHashMap<Position, PaletteId>>,
    listeners: Listeners<Chunk<T>>,
}

impl<T: VoxelInfo> Chunk<T> {
    /// Creates a chunk layered over a shared template.
    pub fn new(template: Arc<PaletteTable<T>>) -> Self {
        Self {
            template,
            override_info_by_palette: None,
            override_palette_by_position: None,
            listeners: Listeners::new(),
        }
    }

    /// Creates a chunk that exclusively owns its template.
    pub fn from_table(template: PaletteTable<T>) -> Self {
        Self::new(Arc::new(template))
    }

    /// The shared template this chunk was built from.
    pub fn template(&self) -> &Arc<PaletteTable<T>> {
        &self.template
    }

    /// Returns the palette id at `position`: override first, then template,
    /// then [`PaletteId::EMPTY`].
    pub fn get_palette_at(&self, position: Position) -> PaletteId {
        if let Some(palette) = self
            .override_palette_by_position
            .as_ref()
            .and_then(|overrides| overrides.get(&position))
        {
            return *palette;
        }
        self.template.palette_at(position)
    }

    /// Resolves the payload at `position` across both id spaces.
    pub fn get_info_at(&self, position: Position) -> Option<&T> {
        let palette = self.get_palette_at(position);
        if palette.is_empty() {
            return None;
        }
        self.override_info_by_palette
            .as_ref()
            .and_then(|infos| infos.get(&palette))
            .or_else(|| self.template.get_info(palette))
    }

    /// Overrides a single voxel and notifies subscribers.
    ///
    /// Returns the palette id the voxel now uses.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::PaletteFull`] if a new id is needed and none is free.
    pub fn set_override(&mut self, position: Position, info: &T) -> Result<PaletteId, ChunkError> {
        let palette = self.apply_override(position, info)?;
        self.regenerate();
        Ok(palette)
    }

    /// Overrides every position in `positions` with the same payload.
    ///
    /// Subscribers are notified once after all positions are applied, even if
    /// applying one of them failed.
    ///
    /// # Errors
    ///
    /// Returns the first [`ChunkError`] encountered.
    pub fn set_overrides(&mut self, positions: &[Position], info: &T) -> Result<(), ChunkError> {
        let result = positions
            .iter()
            .try_for_each(|&position| self.apply_override(position, info).map(|_| ()));
        self.regenerate();
        result
    }

    /// Overrides each position with its own payload, notifying once.
    ///
    /// # Errors
    ///
    /// Returns the first [`ChunkError`] encountered.
    pub fn set_overrides_map(
        &mut self,
        overrides: impl IntoIterator<Item = (Position, T)>,
    ) -> Result<(), ChunkError> {
        let result = overrides
            .into_iter()
            .try_for_each(|(position, info)| self.apply_override(position, &info).map(|_| ()));
        self.regenerate();
        result
    }

    /// Delivers a "regenerated" notification to every subscriber.
    pub fn regenerate(&mut self) {
        tracing::debug!(
            "Chunk regenerated ({} overrides, {} listeners)",
            self.override_count(),
            self.listeners.len()
        );
        // Detach while delivering so callbacks can borrow the chunk.
        let mut listeners = std::mem::take(&mut self.listeners);
        listeners.emit(self);
        self.listeners = listeners;
    }

    /// Registers a callback invoked on every [`regenerate`](Self::regenerate).
    pub fn subscribe(&mut self, callback: impl FnMut(&Chunk<T>) + 'static) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    /// Removes a previously registered callback.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Number of overridden positions.
    pub fn override_count(&self) -> usize {
        self.override_palette_by_position
            .as_ref()
            .map_or(0, |overrides| overrides.len())
    }

    /// Returns `true` if any position has been overridden.
    pub fn has_overrides(&self) -> bool {
        self.override_count() > 0
    }

    /// Builds a standalone table merging the template with all overrides.
    ///
    /// Override entries win wherever both layers define a key. Keys present in
    /// only one layer are carried over, so the result contains the union of
    /// both layers' positions and palette ids.
    pub fn create_combined_view(&self) -> PaletteTable<T> {
        let mut info_by_palette = self.template.info_by_palette().clone();
        if let Some(overrides) = &self.override_info_by_palette {
            info_by_palette.extend(overrides.iter().map(|(&id, info)| (id, info.clone())));
        }

        let mut palette_by_position = self.template.palette_by_position().clone();
        if let Some(overrides) = &self.override_palette_by_position {
            palette_by_position.extend(overrides.iter().map(|(&pos, &id)| (pos, id)));
        }

        PaletteTable::new(info_by_palette, palette_by_position)
    }

    /// Records one override without notifying.
    fn apply_override(&mut self, position: Position, info: &T) -> Result<PaletteId, ChunkError> {
        let palette = self.resolve_palette(info)?;
        self.override_palette_by_position
            .get_or_insert_with(FxHashMap::default)
            .insert(position, palette);
        tracing::trace!("override {} -> palette {} ({})", position, palette, info);
        Ok(palette)
    }

    /// Finds an existing id for `info` or mints a fresh one in the override palette.
    fn resolve_palette(&mut self, info: &T) -> Result<PaletteId, ChunkError> {
        if let Some(palette) = self.template.get_palette_for_info(info) {
            return Ok(palette);
        }

        let overrides = self
            .override_info_by_palette
            .get_or_insert_with(FxHashMap::default);
        if let Some((&palette, _)) = overrides.iter().find(|(_, existing)| *existing == info) {
            return Ok(palette);
        }

        let mut palette = self.template.get_unused_palette_id();
        while overrides.contains_key(&palette) || self.template.contains_palette(palette) {
            palette = palette.next().ok_or(ChunkError::PaletteFull)?;
        }
        overrides.insert(palette, info.clone());
        Ok(palette)
    }
}

impl<T: VoxelInfo> std::fmt::Debug for Chunk<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunk")
            .field("template_voxels", &self.template.voxel_count())
            .field("template_palette", &self.template.palette_len())
            .field("overrides", &self.override_count())
            .field("listeners", &self.listeners)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
