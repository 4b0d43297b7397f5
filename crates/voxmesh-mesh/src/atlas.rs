//! Color atlas: packs every distinct voxel color into one small power-of-two image.
//!
//! Each color occupies a single pixel cell. Cells are filled row-major starting
//! at image row 0, and UV rectangles address cells with `u = column / width`,
//! `v = row / height`. Consumers should sample with nearest filtering.

use std::path::Path;

use glam::Vec2;
use image::{Rgba, RgbaImage};
use voxmesh_voxel::Color;

/// Default inward shrink of a cell's UV rectangle, as a fraction of one cell.
pub const DEFAULT_UV_INSET: f32 = 0.25;

/// Returns the smallest near-square power-of-two `(width, height)` holding
/// `color_count` cells.
///
/// Starting from 1×1, width doubles while `width <= height`, otherwise height
/// doubles.
pub fn atlas_dimensions(color_count: usize) -> (u32, u32) {
    let mut width = 1u32;
    let mut height = 1u32;
    while (width as usize) * (height as usize) < color_count {
        if width <= height {
            width *= 2;
        } else {
            height *= 2;
        }
    }
    (width, height)
}

/// A packed atlas and the ordered list of colors it holds.
#[derive(Clone, Debug)]
pub struct ColorAtlas {
    colors: Vec<Color>,
    image: RgbaImage,
}

impl ColorAtlas {
    /// Packs `colors` (already deduplicated) into a new atlas.
    ///
    /// Cells past the last color stay transparent black.
    pub fn build(colors: Vec<Color>) -> Self {
        let (width, height) = atlas_dimensions(colors.len());
        let mut image = RgbaImage::new(width, height);

        let mut cells = colors.iter();
        'fill: for y in 0..height {
            for x in 0..width {
                let Some(color) = cells.next() else {
                    break 'fill;
                };
                image.put_pixel(x, y, Rgba(color.to_rgba8()));
            }
        }

        Self { colors, image }
    }

    /// Atlas width in cells (pixels).
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Atlas height in cells (pixels).
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The packed colors, in cell order.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Returns the cell index holding `color`.
    pub fn index_of(&self, color: Color) -> Option<usize> {
        self.colors.iter().position(|&c| c == color)
    }

    /// Returns `(column, row)` of cell `index`.
    pub fn cell(&self, index: usize) -> (u32, u32) {
        let width = self.width() as usize;
        ((index % width) as u32, (index / width) as u32)
    }

    /// Returns the four UV corners of cell `index`, in the order
    /// top-left, top-right, bottom-left, bottom-right.
    ///
    /// The rectangle's origin moves inward by `inset` cells on both axes and its
    /// size shrinks by the same amount, keeping samples off the cell's near
    /// edges.
    pub fn cell_uvs(&self, index: usize, inset: f32) -> [Vec2; 4] {
        let (column, row) = self.cell(index);
        let width = self.width() as f32;
        let height = self.height() as f32;

        let min = Vec2::new((column as f32 + inset) / width, (row as f32 + inset) / height);
        let size = Vec2::new((1.0 - inset) / width, (1.0 - inset) / height);
        let max = min + size;

        [
            Vec2::new(min.x, max.y),
            Vec2::new(max.x, max.y),
            Vec2::new(min.x, min.y),
            Vec2::new(max.x, min.y),
        ]
    }

    /// The packed RGBA image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consumes the atlas, returning the image.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Writes the atlas image to `path`; the format follows the extension.
    pub fn save(&self, path: &Path) -> Result<(), image::ImageError> {
        self.image.save(path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
