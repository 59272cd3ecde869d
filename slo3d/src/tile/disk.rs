//! Filesystem-backed tile loader.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::codec::decode_png;
use crate::coord::{BoundingBox, TileCoord, SERVICE_BOUNDS};
use crate::level::{LevelResolution, StorageLevel};
use crate::tile::{TileLoadError, TileLoader};

/// Path of a tile file: `<root>/<storage_level>/<grid_x>_<grid_y>.png`.
///
/// The filename carries the grid index, not the world coordinate.
///
/// ```
/// use std::path::Path;
/// use slo3d::coord::TileCoord;
/// use slo3d::tile::tile_path;
///
/// let path = tile_path(Path::new("/data/tiles"), 3, TileCoord::new(374, 31));
/// assert_eq!(path, Path::new("/data/tiles/3/374_31.png"));
/// ```
pub fn tile_path(root: &Path, storage_level: StorageLevel, tile: TileCoord) -> PathBuf {
    root.join(storage_level.to_string())
        .join(format!("{}_{}.png", tile.grid_x, tile.grid_y))
}

/// Reads tiles from a PNG pyramid on the local filesystem.
///
/// Reads are blocking; run the loader on a blocking-capable thread.
#[derive(Debug, Clone)]
pub struct DiskTileLoader {
    root: PathBuf,
    bounds: BoundingBox,
}

impl DiskTileLoader {
    /// Creates a loader over `root`, restricted to [`SERVICE_BOUNDS`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            bounds: SERVICE_BOUNDS,
        }
    }

    /// Restrict loads to a different bounding box.
    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = bounds;
        self
    }
}

impl TileLoader for DiskTileLoader {
    fn load(
        &self,
        level: &LevelResolution,
        tile: TileCoord,
    ) -> Result<RgbaImage, TileLoadError> {
        let (origin_x, origin_y) = tile.origin();
        if !self.bounds.contains(origin_x, origin_y) {
            return Err(TileLoadError::OutOfRange { tile });
        }

        let path = tile_path(&self.root, level.storage_level, tile);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(TileLoadError::NotFound { path });
            }
            Err(source) => return Err(TileLoadError::Io { path, source }),
        };

        let image = decode_png(&bytes).map_err(|e| TileLoadError::Decode {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let (width, height) = image.dimensions();
        if width != level.tile_dim || height != level.tile_dim {
            return Err(TileLoadError::UnexpectedSize {
                path,
                width,
                height,
                expected: level.tile_dim,
            });
        }

        Ok(image)
    }
}
