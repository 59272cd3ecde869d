//! Coordinate types and constants

use thiserror::Error;

/// Edge length of one tile in world units, identical at every storage level.
pub const TILE_SIZE: i64 = 1000;

/// The extent of world space the service will ever serve.
pub const SERVICE_BOUNDS: BoundingBox = BoundingBox {
    min_x: 374_000.0,
    max_x: 623_000.0,
    min_y: 31_000.0,
    max_y: 194_000.0,
};

/// Errors from coordinate validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// The requested region leaves the service bounding box.
    #[error("Parameters out of range: x={x0}, y={y0}, dim={dim}")]
    OutOfRange { x0: f64, y0: f64, dim: i64 },

    /// The region edge length is not positive.
    #[error("Invalid region dimension: {0}")]
    InvalidDimension(i64),
}

/// Axis-aligned, inclusive rectangle in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Whether a point lies inside the box, edges included.
    ///
    /// Non-finite coordinates are never contained.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

/// Integer grid index of a tile: `(floor(x / 1000), floor(y / 1000))`.
///
/// Grid Y grows in the same direction as world Y (away from the image origin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub grid_x: i64,
    pub grid_y: i64,
}

impl TileCoord {
    pub fn new(grid_x: i64, grid_y: i64) -> Self {
        Self { grid_x, grid_y }
    }

    /// World-space origin (lower-left corner) of the tile.
    pub fn origin(&self) -> (f64, f64) {
        (
            (self.grid_x * TILE_SIZE) as f64,
            (self.grid_y * TILE_SIZE) as f64,
        )
    }

    /// The tile `dx` columns and `dy` rows away.
    pub fn offset(&self, dx: u32, dy: u32) -> Self {
        Self {
            grid_x: self.grid_x + i64::from(dx),
            grid_y: self.grid_y + i64::from(dy),
        }
    }
}

/// A requested square region: origin and edge length in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRegion {
    pub x0: f64,
    pub y0: f64,
    pub dim: i64,
}

impl WorldRegion {
    pub fn new(x0: f64, y0: f64, dim: i64) -> Self {
        Self { x0, y0, dim }
    }

    /// Far X edge (`x0 + dim`).
    pub fn x1(&self) -> f64 {
        self.x0 + self.dim as f64
    }

    /// Far Y edge (`y0 + dim`).
    pub fn y1(&self) -> f64 {
        self.y0 + self.dim as f64
    }

    /// Check that both corners of the region lie within `bounds`.
    ///
    /// # Errors
    ///
    /// - [`CoordError::InvalidDimension`] if `dim` is not positive
    /// - [`CoordError::OutOfRange`] if any edge leaves the box
    pub fn validate(&self, bounds: &BoundingBox) -> Result<(), CoordError> {
        if self.dim <= 0 {
            return Err(CoordError::InvalidDimension(self.dim));
        }
        if !bounds.contains(self.x0, self.y0) || !bounds.contains(self.x1(), self.y1()) {
            return Err(CoordError::OutOfRange {
                x0: self.x0,
                y0: self.y0,
                dim: self.dim,
            });
        }
        Ok(())
    }

    /// Tile containing the region origin.
    pub fn origin_tile(&self) -> TileCoord {
        super::to_tile_coord(self.x0, self.y0)
    }
}
