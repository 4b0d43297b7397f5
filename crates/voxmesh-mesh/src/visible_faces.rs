//! Bitmask for tracking which of a voxel's six faces are visible.

use voxmesh_voxel::{PaletteTable, Position, VoxelInfo};

use crate::face_direction::FaceDirection;

/// Bitmask indicating which of a voxel's 6 faces are visible.
///
/// Bit `i` corresponds to `FaceDirection::ALL[i]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisibleFaces(pub u8);

impl VisibleFaces {
    /// No faces visible.
    pub const NONE: Self = Self(0);
    /// All six faces visible.
    pub const ALL: Self = Self(0b0011_1111);

    /// Computes the faces of the voxel at `position` not covered by an
    /// occupied neighbor in `table`. A neighbor outside the `i32` range counts
    /// as unoccupied.
    pub fn of<T: VoxelInfo>(table: &PaletteTable<T>, position: Position) -> Self {
        let mut faces = Self::NONE;
        for direction in FaceDirection::ALL {
            let covered = direction
                .offset(position)
                .is_some_and(|neighbor| table.is_occupied(neighbor));
            if !covered {
                faces.set_visible(direction);
            }
        }
        faces
    }

    /// Returns `true` if the face in the given direction is visible.
    pub fn is_visible(self, direction: FaceDirection) -> bool {
        self.0 & (1 << direction as u8) != 0
    }

    /// Marks the face in the given direction as visible.
    pub fn set_visible(&mut self, direction: FaceDirection) {
        self.0 |= 1 << direction as u8;
    }

    /// Iterates the visible directions in emission order.
    pub fn iter(self) -> impl Iterator<Item = FaceDirection> {
        FaceDirection::ALL
            .into_iter()
            .filter(move |&direction| self.is_visible(direction))
    }

    /// Returns the number of visible faces (0–6).
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }
}
