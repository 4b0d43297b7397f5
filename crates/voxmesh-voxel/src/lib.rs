//! Sparse voxel volumes: palette tables, override-layered chunks, containers, and change notification.

pub mod chunk;
pub mod container;
pub mod info;
pub mod listeners;
pub mod palette;
pub mod position;
pub mod reconcile;

pub use chunk::{Chunk, ChunkError};
pub use container::{ChunkEntry, ChunkId, ChunkProperties, Container};
pub use info::{Color, ColorVoxelInfo, HasColor, VoxelInfo};
pub use listeners::{ListenerId, Listeners};
pub use palette::PaletteTable;
pub use position::{PaletteId, Position};
pub use reconcile::{Reconciliation, reconcile};
