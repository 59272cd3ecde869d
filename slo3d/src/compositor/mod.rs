//! Canvas composition
//!
//! Loads every tile covering a requested region and pastes them into one
//! canvas, aligned to the tile grid.
//!
//! ```text
//!   world Y ▲                       canvas row 0 ─► ┌────┬────┐
//!           │  (374,32) (375,32)                    │ 0,1│ 1,1│
//!           │  (374,31) (375,31)                    ├────┼────┤
//!           └──────────► world X                    │ 0,0│ 1,0│
//!                                                   └────┴────┘
//! ```
//!
//! A tile that cannot be loaded leaves its canvas area transparent. Only an
//! invalid region, an unknown level, a sub-pixel crop or an oversized canvas
//! rejects the composition.

mod types;

pub use types::{CanvasLayout, ComposeError, ComposeStats, Composite};

use std::sync::Arc;

use image::{imageops, RgbaImage};
use rayon::prelude::*;
use tracing::debug;

use crate::coord::{BoundingBox, WorldRegion, SERVICE_BOUNDS};
use crate::level::{DetailLevel, LevelMapper};
use crate::tile::TileLoader;

/// Largest canvas, in pixels, a composition may allocate by default
/// (1 GiB of RGBA).
pub const DEFAULT_MAX_CANVAS_PIXELS: u64 = 1 << 28;

/// Assembles tile canvases for requested regions.
///
/// Tiles for one composition are loaded in parallel on the rayon pool; each
/// writes a disjoint canvas area, so they are pasted after the join in any
/// order.
pub struct Compositor {
    loader: Arc<dyn TileLoader>,
    levels: LevelMapper,
    bounds: BoundingBox,
    max_canvas_pixels: u64,
}

impl Compositor {
    /// Creates a compositor with the standard level tables and service bounds.
    pub fn new(loader: Arc<dyn TileLoader>) -> Self {
        Self {
            loader,
            levels: LevelMapper::standard(),
            bounds: SERVICE_BOUNDS,
            max_canvas_pixels: DEFAULT_MAX_CANVAS_PIXELS,
        }
    }

    /// Validate regions against a different bounding box.
    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the canvas allocation limit.
    pub fn with_max_canvas_pixels(mut self, max_pixels: u64) -> Self {
        self.max_canvas_pixels = max_pixels;
        self
    }

    /// Compose the canvas covering `region` at `detail_level`.
    ///
    /// # Errors
    ///
    /// - [`ComposeError::Region`] if the region is invalid or out of bounds
    /// - [`ComposeError::Level`] if the detail level is unknown
    /// - [`ComposeError::EmptyOutput`] if the crop would be zero pixels wide
    /// - [`ComposeError::CanvasTooLarge`] if the canvas exceeds the limit
    pub fn compose(
        &self,
        region: &WorldRegion,
        detail_level: DetailLevel,
    ) -> Result<Composite, ComposeError> {
        region.validate(&self.bounds)?;
        let level = self.levels.resolve(detail_level)?;
        if (region.dim as f64 * level.scale()).round() < 1.0 {
            return Err(ComposeError::EmptyOutput {
                dim: region.dim,
                storage_level: level.storage_level,
            });
        }
        let layout = CanvasLayout::covering(region, level);

        let (width, height) = (layout.width(), layout.height());
        let pixels = width.saturating_mul(height);
        if pixels > self.max_canvas_pixels {
            return Err(ComposeError::CanvasTooLarge {
                width,
                height,
                max_pixels: self.max_canvas_pixels,
            });
        }
        // Both fit in u32: the pixel count is bounded above.
        let mut canvas = RgbaImage::new(width as u32, height as u32);

        let positions: Vec<(u32, u32)> = layout.positions().collect();
        let loaded: Vec<_> = positions
            .into_par_iter()
            .map(|(ix, iy)| {
                let tile = layout.tile_at(ix, iy);
                (ix, iy, tile, self.loader.load(&level, tile))
            })
            .collect();

        let mut stats = ComposeStats::default();
        for (ix, iy, tile, result) in loaded {
            match result {
                Ok(image) => {
                    let (x, y) = layout.tile_offset(ix, iy);
                    imageops::replace(&mut canvas, &image, x as i64, y as i64);
                    stats.loaded += 1;
                }
                Err(e) => {
                    debug!(
                        grid_x = tile.grid_x,
                        grid_y = tile.grid_y,
                        storage_level = level.storage_level,
                        kind = e.kind(),
                        error = %e,
                        "Tile left blank"
                    );
                    stats.record_failure(&e);
                }
            }
        }

        debug!(
            tiles_x = layout.tiles_x,
            tiles_y = layout.tiles_y,
            loaded = stats.loaded,
            blank = stats.blank(),
            "Canvas composed"
        );

        Ok(Composite {
            canvas,
            layout,
            stats,
        })
    }
}
