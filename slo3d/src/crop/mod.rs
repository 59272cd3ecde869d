//! Precision cropping of composed canvases.
//!
//! The canvas starts at the tile floor of the requested region; the crop
//! window is offset by how far the region origin sits past that floor,
//! converted to pixels and mirrored vertically like tile placement.

use image::{imageops, RgbaImage};

use crate::compositor::{CanvasLayout, Composite};
use crate::coord::WorldRegion;

/// Pixel rectangle of the requested region inside a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub x: u32,
    pub y: u32,
    pub dim: u32,
}

impl CropWindow {
    /// Locate `region` within a canvas laid out as `layout`.
    ///
    /// The window always lies inside the canvas: the layout covers one full
    /// tile beyond the region's far edge on each axis, which absorbs rounding.
    pub fn locate(layout: &CanvasLayout, region: &WorldRegion) -> Self {
        let scale = layout.level.scale();
        let dim = (region.dim as f64 * scale).round() as i64;
        let x = ((region.x0 - layout.x_tile0) * scale).round() as i64;
        let y = layout.height() as i64 - ((region.y0 - layout.y_tile0) * scale).round() as i64 - dim;

        debug_assert!(
            x >= 0 && y >= 0 && x + dim <= layout.width() as i64,
            "crop window ({}, {}, {}) escapes {}×{} canvas",
            x,
            y,
            dim,
            layout.width(),
            layout.height()
        );

        Self {
            x: x.max(0) as u32,
            y: y.max(0) as u32,
            dim: dim.max(0) as u32,
        }
    }
}

/// Cut the requested region out of a composite.
///
/// The result is `round(dim · tile_dim / 1000)` pixels square.
pub fn crop(composite: &Composite, region: &WorldRegion) -> RgbaImage {
    let window = CropWindow::locate(&composite.layout, region);
    imageops::crop_imm(
        &composite.canvas,
        window.x,
        window.y,
        window.dim,
        window.dim,
    )
    .to_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::ComposeStats;
    use crate::level::LevelResolution;
    use image::Rgba;

    fn layout_for(region: &WorldRegion, tile_dim: u32) -> CanvasLayout {
        CanvasLayout::covering(
            region,
            LevelResolution {
                storage_level: 1,
                tile_dim,
            },
        )
    }

    #[test]
    fn test_locate_aligned_region() {
        let region = WorldRegion::new(374000.0, 31000.0, 1000);
        let window = CropWindow::locate(&layout_for(&region, 8), &region);

        // Canvas is 16px high; the region is the bottom-left tile.
        assert_eq!(window, CropWindow { x: 0, y: 8, dim: 8 });
    }

    #[test]
    fn test_locate_unaligned_region() {
        let region = WorldRegion::new(374500.0, 31500.0, 1500);
        let window = CropWindow::locate(&layout_for(&region, 4), &region);

        // 3×3 tiles of 4px = 12px canvas; 500 units = 2px, 1500 units = 6px.
        assert_eq!(window, CropWindow { x: 2, y: 4, dim: 6 });
    }

    #[test]
    fn test_locate_rounds_to_nearest_pixel() {
        // tile_dim 125: 0.125 px per unit; 300 units = 37.5px → 38.
        let region = WorldRegion::new(374100.0, 31000.0, 300);
        let window = CropWindow::locate(&layout_for(&region, 125), &region);

        assert_eq!(window.dim, 38);
        assert_eq!(window.x, 13); // 12.5 rounds away from zero
    }

    #[test]
    fn test_crop_extracts_window() {
        let region = WorldRegion::new(374000.0, 31000.0, 1000);
        let layout = layout_for(&region, 8);
        let mut canvas = RgbaImage::new(16, 16);
        for y in 8..16 {
            for x in 0..8 {
                canvas.put_pixel(x, y, Rgba([9, 9, 9, 255]));
            }
        }
        let composite = Composite {
            canvas,
            layout,
            stats: ComposeStats::default(),
        };

        let cropped = crop(&composite, &region);

        assert_eq!(cropped.dimensions(), (8, 8));
        assert!(cropped.pixels().all(|p| *p == Rgba([9, 9, 9, 255])));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_window_within_canvas(
                x0 in 374000.0..600000.0_f64,
                y0 in 31000.0..170000.0_f64,
                dim in 1i64..20000,
                tile_dim in prop::sample::select(vec![2u32, 4, 8, 16, 32, 63, 125, 250, 500, 1000]),
            ) {
                let region = WorldRegion::new(x0, y0, dim);
                let layout = layout_for(&region, tile_dim);
                let window = CropWindow::locate(&layout, &region);

                let expected = (dim as f64 * f64::from(tile_dim) / 1000.0).round() as u32;
                prop_assert_eq!(window.dim, expected);
                prop_assert!(u64::from(window.x + window.dim) <= layout.width());
                prop_assert!(u64::from(window.y + window.dim) <= layout.height());
            }
        }
    }
}
