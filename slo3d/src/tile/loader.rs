//! TileLoader trait for abstracting tile storage.
//!
//! # Example
//!
//! ```
//! use slo3d::coord::TileCoord;
//! use slo3d::level::LevelMapper;
//! use slo3d::tile::{DiskTileLoader, TileLoader};
//!
//! fn first_tile(loader: &dyn TileLoader) -> bool {
//!     let level = LevelMapper::standard().resolve(7).unwrap();
//!     loader.load(&level, TileCoord::new(374, 31)).is_ok()
//! }
//!
//! let loader = DiskTileLoader::new("/nonexistent");
//! assert!(!first_tile(&loader));
//! ```

use image::RgbaImage;

use crate::coord::TileCoord;
use crate::level::LevelResolution;
use crate::tile::TileLoadError;

/// Source of decoded tile rasters.
///
/// Implementations must be thread-safe (`Send + Sync`): a single loader is
/// shared by all requests and tiles of one request are loaded in parallel.
///
/// # Implementors
///
/// - [`DiskTileLoader`](crate::tile::DiskTileLoader) - reads the PNG pyramid
///   from the local filesystem
pub trait TileLoader: Send + Sync {
    /// Load one tile.
    ///
    /// # Arguments
    ///
    /// * `level` - Resolved storage level and expected tile pixel size
    /// * `tile` - Grid coordinate of the tile
    ///
    /// # Returns
    ///
    /// A raster of exactly `level.tile_dim × level.tile_dim` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`TileLoadError`] if the tile is outside the service bounds,
    /// missing, unreadable, or undecodable.
    fn load(&self, level: &LevelResolution, tile: TileCoord)
        -> Result<RgbaImage, TileLoadError>;
}
