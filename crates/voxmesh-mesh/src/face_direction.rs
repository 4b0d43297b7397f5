//! The six axis-aligned face directions and the canonical unit-cube geometry.

use glam::Vec3;
use voxmesh_voxel::Position;

/// Corners of a cube with half-extent 1, centered on the origin.
///
/// ```text
///        b - - - - - - - a
///        | \      +y     | \
///        |   e - - - - - - - f
///        |   |           |   |
///     -x |   |   +z  -z  |   | +x
///        |   |           |   |
///        c - | - - - - - d   |
///          \ |     -y      \ |
///            h - - - - - - - g
/// ```
pub const CUBE_CORNERS: [Vec3; 8] = [
    Vec3::new(1.0, 1.0, 1.0),    // a
    Vec3::new(-1.0, 1.0, 1.0),   // b
    Vec3::new(-1.0, -1.0, 1.0),  // c
    Vec3::new(1.0, -1.0, 1.0),   // d
    Vec3::new(-1.0, 1.0, -1.0),  // e
    Vec3::new(1.0, 1.0, -1.0),   // f
    Vec3::new(1.0, -1.0, -1.0),  // g
    Vec3::new(-1.0, -1.0, -1.0), // h
];

/// Indices into [`CUBE_CORNERS`] for the four corners of each face, indexed by
/// [`FaceDirection::index`]. Corners wind counter-clockwise seen from outside.
const FACE_CORNERS: [[usize; 4]; 6] = [
    [0, 1, 2, 3], // a b c d  +Z
    [5, 0, 3, 6], // f a d g  +X
    [4, 5, 6, 7], // e f g h  -Z
    [1, 4, 7, 2], // b e h c  -X
    [5, 4, 1, 0], // f e b a  +Y
    [3, 2, 7, 6], // d c h g  -Y
];

/// One of the six cardinal directions a voxel face can point.
///
/// The discriminant order is the mesher's emission order and doubles as the
/// bit index inside [`super::VisibleFaces`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FaceDirection {
    /// +Z direction.
    PosZ = 0,
    /// +X direction.
    PosX = 1,
    /// −Z direction.
    NegZ = 2,
    /// −X direction.
    NegX = 3,
    /// +Y direction.
    PosY = 4,
    /// −Y direction.
    NegY = 5,
}

impl FaceDirection {
    /// All six directions in emission order.
    pub const ALL: [FaceDirection; 6] = [
        Self::PosZ,
        Self::PosX,
        Self::NegZ,
        Self::NegX,
        Self::PosY,
        Self::NegY,
    ];

    /// Returns the unit offset `(dx, dy, dz)` towards the neighbor.
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Self::PosZ => (0, 0, 1),
            Self::PosX => (1, 0, 0),
            Self::NegZ => (0, 0, -1),
            Self::NegX => (-1, 0, 0),
            Self::PosY => (0, 1, 0),
            Self::NegY => (0, -1, 0),
        }
    }

    /// Returns the neighbor position in this direction, or `None` at the edge
    /// of the coordinate range.
    pub fn offset(self, position: Position) -> Option<Position> {
        let (dx, dy, dz) = self.delta();
        position.checked_offset(dx, dy, dz)
    }

    /// Returns the outward unit normal.
    pub fn normal(self) -> Vec3 {
        let (dx, dy, dz) = self.delta();
        Vec3::new(dx as f32, dy as f32, dz as f32)
    }

    /// Returns the opposite face direction.
    pub fn opposite(self) -> Self {
        match self {
            Self::PosZ => Self::NegZ,
            Self::PosX => Self::NegX,
            Self::NegZ => Self::PosZ,
            Self::NegX => Self::PosX,
            Self::PosY => Self::NegY,
            Self::NegY => Self::PosY,
        }
    }

    /// Returns the four corners of this face of a cube centered on `center`
    /// with half-extent `scale`.
    pub fn face_vertices(self, center: Vec3, scale: f32) -> [Vec3; 4] {
        FACE_CORNERS[self.index()].map(|corner| CUBE_CORNERS[corner] * scale + center)
    }

    /// Returns the direction index (0–5).
    pub fn index(self) -> usize {
        self as usize
    }
}
