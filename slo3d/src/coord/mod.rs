//! World coordinate and tile grid conversions
//!
//! World space is planar: X grows eastward, Y grows northward, and the grid
//! subdivides it into squares of [`TILE_SIZE`] world units regardless of
//! storage level.

mod types;

pub use types::{BoundingBox, CoordError, TileCoord, WorldRegion, SERVICE_BOUNDS, TILE_SIZE};

/// Converts a world coordinate to the tile grid index containing it.
#[inline]
pub fn to_tile_coord(x: f64, y: f64) -> TileCoord {
    TileCoord {
        grid_x: grid_index(x),
        grid_y: grid_index(y),
    }
}

/// Snaps a world coordinate down to the nearest tile boundary.
#[inline]
pub fn tile_floor(v: f64) -> f64 {
    (grid_index(v) * TILE_SIZE) as f64
}

#[inline]
fn grid_index(v: f64) -> i64 {
    (v / TILE_SIZE as f64).floor() as i64
}
