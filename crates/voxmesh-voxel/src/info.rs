//! Per-voxel payloads.
//!
//! Chunks and palette tables are generic over any [`VoxelInfo`]. Palette
//! deduplication relies on value equality, so two payloads that compare equal
//! share one palette id.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Capability set required of a voxel payload.
pub trait VoxelInfo: Clone + PartialEq + fmt::Debug + fmt::Display {}

/// Payloads that resolve to a single flat color for atlas packing.
pub trait HasColor {
    /// The color used for every face of the voxel.
    fn color(&self) -> Color;
}

/// Linear RGBA color with `f32` channels in `[0.0, 1.0]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha. Missing alpha reads as opaque.
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Creates an opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a color with explicit alpha.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Quantizes to 8-bit channels, clamping out-of-range values.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RGBA({:.3}, {:.3}, {:.3}, {:.3})",
            self.r, self.g, self.b, self.a
        )
    }
}

/// A voxel payload holding a single color.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorVoxelInfo {
    /// Face color.
    #[serde(alias = "c")]
    pub color: Color,
}

impl ColorVoxelInfo {
    /// Creates a color payload.
    pub const fn new(color: Color) -> Self {
        Self { color }
    }
}

impl VoxelInfo for ColorVoxelInfo {}

impl HasColor for ColorVoxelInfo {
    fn color(&self) -> Color {
        self.color
    }
}

impl fmt::Display for ColorVoxelInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(ColorVoxelInfo) {}", self.color)
    }
}
