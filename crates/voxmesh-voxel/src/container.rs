//! Keyed collection of chunks with per-chunk placement.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chunk::Chunk;
use crate::info::VoxelInfo;
use crate::listeners::{ListenerId, Listeners};
use crate::position::Position;

/// Stable identifier of a chunk within its [`Container`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkId(pub u32);

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Placement of a chunk inside its container.
///
/// Serialized as `{"offset":{..},"rotation":{..}}`; the short keys `o` and `r`
/// are accepted when reading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkProperties {
    /// Integer translation of the chunk.
    #[serde(alias = "o", default)]
    pub offset: Position,
    /// Integer Euler rotation of the chunk, in degrees.
    #[serde(alias = "r", default)]
    pub rotation: Position,
}

impl ChunkProperties {
    /// Creates placement properties.
    pub fn new(offset: Position, rotation: Position) -> Self {
        Self { offset, rotation }
    }
}

/// A chunk together with its placement.
#[derive(Debug)]
pub struct ChunkEntry<T: VoxelInfo> {
    /// The voxel data.
    pub chunk: Chunk<T>,
    /// Where the chunk sits in the container.
    pub properties: ChunkProperties,
}

/// Owns a set of chunks keyed by [`ChunkId`].
///
/// Iteration is in ascending id order, which is insertion order for chunks
/// added through [`Container::add_chunk`].
pub struct Container<T: VoxelInfo> {
    entries: BTreeMap<ChunkId, ChunkEntry<T>>,
    next_id: u32,
    listeners: Listeners<Container<T>>,
}

impl<T: VoxelInfo> Container<T> {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: 0,
            listeners: Listeners::new(),
        }
    }

    /// Creates a container holding `chunks` in the given order.
    pub fn from_chunks(chunks: impl IntoIterator<Item = (Chunk<T>, ChunkProperties)>) -> Self {
        let mut container = Self::new();
        for (chunk, properties) in chunks {
            container.add_chunk(chunk, properties);
        }
        container
    }

    /// Adds a chunk and returns its new id.
    pub fn add_chunk(&mut self, chunk: Chunk<T>, properties: ChunkProperties) -> ChunkId {
        let id = ChunkId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, ChunkEntry { chunk, properties });
        id
    }

    /// Stores a chunk under `id`, returning the entry it replaced.
    pub fn replace_chunk(
        &mut self,
        id: ChunkId,
        chunk: Chunk<T>,
        properties: ChunkProperties,
    ) -> Option<ChunkEntry<T>> {
        self.next_id = self.next_id.max(id.0.saturating_add(1));
        self.entries.insert(id, ChunkEntry { chunk, properties })
    }

    /// Removes and returns the entry under `id`.
    pub fn remove_chunk(&mut self, id: ChunkId) -> Option<ChunkEntry<T>> {
        self.entries.remove(&id)
    }

    /// Immutable access to an entry.
    pub fn get(&self, id: ChunkId) -> Option<&ChunkEntry<T>> {
        self.entries.get(&id)
    }

    /// Mutable access to an entry (for applying overrides).
    pub fn get_mut(&mut self, id: ChunkId) -> Option<&mut ChunkEntry<T>> {
        self.entries.get_mut(&id)
    }

    /// Iterates over `(id, entry)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (ChunkId, &ChunkEntry<T>)> {
        self.entries.iter().map(|(&id, entry)| (id, entry))
    }

    /// Mutable iteration in id order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ChunkId, &mut ChunkEntry<T>)> {
        self.entries.iter_mut().map(|(&id, entry)| (id, entry))
    }

    /// Chunk ids in iteration order.
    pub fn ids(&self) -> Vec<ChunkId> {
        self.entries.keys().copied().collect()
    }

    /// Number of chunks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the container holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Notifies container subscribers.
    pub fn regenerate(&mut self) {
        tracing::debug!("Container regenerated ({} chunks)", self.entries.len());
        let mut listeners = std::mem::take(&mut self.listeners);
        listeners.emit(self);
        self.listeners = listeners;
    }

    /// Calls [`Chunk::regenerate`] on every chunk.
    pub fn regenerate_all(&mut self) {
        for entry in self.entries.values_mut() {
            entry.chunk.regenerate();
        }
    }

    /// Registers a callback invoked on every [`regenerate`](Self::regenerate).
    pub fn subscribe(&mut self, callback: impl FnMut(&Container<T>) + 'static) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    /// Removes a previously registered callback.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

impl<T: VoxelInfo> Default for Container<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: VoxelInfo> fmt::Debug for Container<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("entries", &self.entries)
            .field("listeners", &self.listeners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::info::{Color, ColorVoxelInfo};
    use crate::palette::PaletteTable;

    fn empty_chunk() -> Chunk<ColorVoxelInfo> {
        Chunk::from_table(PaletteTable::empty())
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let mut container = Container::new();
        let a = container.add_chunk(empty_chunk(), ChunkProperties::default());
        let b = container.add_chunk(empty_chunk(), ChunkProperties::default());
        assert_eq!(a, ChunkId(0));
        assert_eq!(b, ChunkId(1));
        assert_eq!(container.ids(), vec![a, b]);
    }

    #[test]
    fn test_replace_and_remove() {
        let mut container = Container::new();
        let props = ChunkProperties::new(Position::new(1, 2, 3), Position::ZERO);
        let id = container.add_chunk(empty_chunk(), ChunkProperties::default());

        let old = container.replace_chunk(id, empty_chunk(), props);
        assert!(old.is_some());
        assert_eq!(container.get(id).map(|e| e.properties), Some(props));

        assert!(container.remove_chunk(id).is_some());
        assert!(container.remove_chunk(id).is_none());
        assert!(container.is_empty());
    }

    #[test]
    fn test_replace_unknown_id_does_not_collide_with_later_adds() {
        let mut container = Container::new();
        assert!(container
            .replace_chunk(ChunkId(5), empty_chunk(), ChunkProperties::default())
            .is_none());
        let next = container.add_chunk(empty_chunk(), ChunkProperties::default());
        assert_eq!(next, ChunkId(6));
    }

    #[test]
    fn test_regenerate_all_reaches_every_chunk() {
        let hits = Rc::new(RefCell::new(Vec::new()));
        let mut container = Container::new();
        for tag in 0..3u32 {
            let mut chunk = empty_chunk();
            let h = Rc::clone(&hits);
            chunk.subscribe(move |_| h.borrow_mut().push(tag));
            container.add_chunk(chunk, ChunkProperties::default());
        }
        container.regenerate_all();
        assert_eq!(*hits.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_container_listener_sees_container() {
        let seen = Rc::new(RefCell::new(0));
        let mut container: Container<ColorVoxelInfo> = Container::new();
        container.add_chunk(empty_chunk(), ChunkProperties::default());
        let s = Rc::clone(&seen);
        let id = container.subscribe(move |c| *s.borrow_mut() = c.len());
        container.regenerate();
        assert_eq!(*seen.borrow(), 1);
        assert!(container.unsubscribe(id));
    }

    #[test]
    fn test_override_through_get_mut() {
        let mut container = Container::new();
        let id = container.add_chunk(empty_chunk(), ChunkProperties::default());
        let info = ColorVoxelInfo::new(Color::WHITE);
        container
            .get_mut(id)
            .unwrap()
            .chunk
            .set_override(Position::ZERO, &info)
            .unwrap();
        assert_eq!(
            container.get(id).unwrap().chunk.get_info_at(Position::ZERO),
            Some(&info)
        );
    }

    #[test]
    fn test_properties_json_shape() {
        let props = ChunkProperties::new(Position::new(1, 0, -1), Position::new(0, 90, 0));
        let json = serde_json::to_string(&props).unwrap();
        assert_eq!(
            json,
            r#"{"offset":{"x":1,"y":0,"z":-1},"rotation":{"x":0,"y":90,"z":0}}"#
        );
        let short: ChunkProperties =
            serde_json::from_str(r#"{"o":{"x":1,"y":0,"z":-1},"r":{"x":0,"y":90,"z":0}}"#)
                .unwrap();
        assert_eq!(short, props);
    }
}
