//! Integer key types shared by every voxel structure.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A signed integer voxel coordinate.
///
/// Voxels are unit cubes centered on integer coordinates. The same triple is
/// used for chunk placement offsets and rotations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Z coordinate.
    pub z: i32,
}

impl Position {
    /// The origin `(0, 0, 0)`.
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// Creates a new position.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns the position offset by `(dx, dy, dz)`, or `None` if any axis
    /// leaves the `i32` range.
    pub fn checked_offset(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(dx)?,
            self.y.checked_add(dy)?,
            self.z.checked_add(dz)?,
        ))
    }
}

impl From<(i32, i32, i32)> for Position {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Chunk-local palette identifier (2 bytes).
///
/// `PaletteId(0)` is reserved for "no voxel" and is never assigned to a payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PaletteId(pub u16);

impl PaletteId {
    /// The empty sentinel.
    pub const EMPTY: Self = Self(0);

    /// Returns `true` for the empty sentinel.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the next id, or `None` when the id space is exhausted.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for PaletteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
