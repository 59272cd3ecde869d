//! Compositor types and errors

use image::RgbaImage;
use thiserror::Error;

use crate::coord::{self, CoordError, TileCoord, WorldRegion, TILE_SIZE};
use crate::level::{LevelError, LevelResolution, StorageLevel};
use crate::tile::TileLoadError;

/// Errors that reject a whole composition.
///
/// Per-tile failures never appear here; they degrade to blank canvas areas.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComposeError {
    /// The requested region is invalid or outside the service bounds.
    #[error(transparent)]
    Region(#[from] CoordError),

    /// The detail level could not be resolved.
    #[error(transparent)]
    Level(#[from] LevelError),

    /// The region is smaller than one output pixel at the resolved level.
    #[error("Region dim={dim} is smaller than one pixel at storage level {storage_level}")]
    EmptyOutput { dim: i64, storage_level: StorageLevel },

    /// The canvas covering the region would exceed the allocation limit.
    #[error("Canvas {width}×{height} exceeds the limit of {max_pixels} pixels")]
    CanvasTooLarge {
        width: u64,
        height: u64,
        max_pixels: u64,
    },
}

/// Geometry of a composite canvas: which tiles it covers and where each
/// one is placed.
///
/// Canvas row 0 is the top of the image while world Y grows upward, so the
/// first tile row (lowest Y) is placed at the bottom of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    /// World X of the grid-aligned floor of the region.
    pub x_tile0: f64,
    /// World Y of the grid-aligned floor of the region.
    pub y_tile0: f64,
    /// Resolved storage level and tile pixel size.
    pub level: LevelResolution,
    /// Tile columns on the canvas.
    pub tiles_x: u32,
    /// Tile rows on the canvas.
    pub tiles_y: u32,
}

impl CanvasLayout {
    /// Layout of the canvas covering `region` at `level`.
    ///
    /// Each axis walks from the tile floor in [`TILE_SIZE`] steps while the
    /// cursor is still short of the region's far edge; the tile count is the
    /// number of steps plus one.
    pub fn covering(region: &WorldRegion, level: LevelResolution) -> Self {
        let x_tile0 = coord::tile_floor(region.x0);
        let y_tile0 = coord::tile_floor(region.y0);

        Self {
            x_tile0,
            y_tile0,
            level,
            tiles_x: tiles_to_cover(x_tile0, region.x1()),
            tiles_y: tiles_to_cover(y_tile0, region.y1()),
        }
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u64 {
        u64::from(self.tiles_x) * u64::from(self.level.tile_dim)
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u64 {
        u64::from(self.tiles_y) * u64::from(self.level.tile_dim)
    }

    /// Grid coordinate of the lower-left tile.
    pub fn origin_tile(&self) -> TileCoord {
        coord::to_tile_coord(self.x_tile0, self.y_tile0)
    }

    /// Grid coordinate of the tile at column `ix`, row `iy`.
    pub fn tile_at(&self, ix: u32, iy: u32) -> TileCoord {
        self.origin_tile().offset(ix, iy)
    }

    /// Top-left pixel at which the tile at column `ix`, row `iy` is pasted.
    pub fn tile_offset(&self, ix: u32, iy: u32) -> (u64, u64) {
        let dim = u64::from(self.level.tile_dim);
        let x = u64::from(ix) * dim;
        let y = self.height() - (u64::from(iy) + 1) * dim;
        (x, y)
    }

    /// Every `(ix, iy)` position in row-major order, lowest row first.
    pub fn positions(&self) -> impl Iterator<Item = (u32, u32)> {
        let tiles_x = self.tiles_x;
        (0..self.tiles_y).flat_map(move |iy| (0..tiles_x).map(move |ix| (ix, iy)))
    }
}

fn tiles_to_cover(floor: f64, end: f64) -> u32 {
    let mut cursor = floor;
    let mut steps = 0;
    while cursor < end {
        cursor += TILE_SIZE as f64;
        steps += 1;
    }
    steps + 1
}

/// Counts of tile outcomes for one composition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposeStats {
    /// Tiles pasted onto the canvas.
    pub loaded: usize,
    /// Tiles outside the service bounds.
    pub out_of_range: usize,
    /// Tiles with no backing file.
    pub missing: usize,
    /// Tiles that could not be read or decoded.
    pub failed: usize,
}

impl ComposeStats {
    pub(crate) fn record_failure(&mut self, error: &TileLoadError) {
        match error {
            TileLoadError::OutOfRange { .. } => self.out_of_range += 1,
            TileLoadError::NotFound { .. } => self.missing += 1,
            TileLoadError::Io { .. }
            | TileLoadError::Decode { .. }
            | TileLoadError::UnexpectedSize { .. } => self.failed += 1,
        }
    }

    /// Tiles left blank for any reason.
    pub fn blank(&self) -> usize {
        self.out_of_range + self.missing + self.failed
    }
}

/// A composed canvas and the layout needed to crop it.
#[derive(Debug, Clone)]
pub struct Composite {
    pub canvas: RgbaImage,
    pub layout: CanvasLayout,
    pub stats: ComposeStats,
}
