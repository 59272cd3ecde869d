//! Level-of-detail mapping
//!
//! Client requests name a *detail level*; tiles on disk are organised by
//! *storage level*, one directory per distinct tile pixel size. Several
//! detail levels share a storage level, so the mapping is many-to-one.
//!
//! Both tables are compile-time constants and are never mutated.

use thiserror::Error;

/// Client-facing level of detail, as received in a request.
pub type DetailLevel = i64;

/// Resolution tier of the tile pyramid (directory name under the tile root).
pub type StorageLevel = u32;

/// Detail level → storage level.
pub const DETAIL_LEVELS: &[(DetailLevel, StorageLevel)] = &[
    (2, 2),
    (3, 2),
    (4, 2),
    (5, 2),
    (6, 2),
    (7, 3),
    (8, 4),
    (9, 5),
    (10, 7),
    (11, 10),
];

/// Storage level → pixel edge length of every tile stored at that level.
pub const TILE_DIMENSIONS: &[(StorageLevel, u32)] = &[
    (10, 1000),
    (9, 500),
    (8, 250),
    (7, 125),
    (6, 63),
    (5, 32),
    (4, 16),
    (3, 8),
    (2, 4),
    (1, 2),
];

/// Errors from level resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    /// The detail level has no storage level mapping.
    #[error("Unknown detail level: {0}")]
    UnknownLevel(DetailLevel),

    /// The storage level has no tile dimension entry.
    ///
    /// Only reachable with inconsistent tables.
    #[error("Unknown storage level {storage_level} (resolved from detail level {detail_level})")]
    UnknownStorageLevel {
        detail_level: DetailLevel,
        storage_level: StorageLevel,
    },
}

/// A resolved detail level: where its tiles live and how large they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelResolution {
    /// Storage level directory holding the tiles.
    pub storage_level: StorageLevel,
    /// Pixel width and height of each tile at this storage level.
    pub tile_dim: u32,
}

impl LevelResolution {
    /// Pixels per world unit at this level.
    pub fn scale(&self) -> f64 {
        f64::from(self.tile_dim) / crate::coord::TILE_SIZE as f64
    }
}

/// Pure lookup from detail level to storage level and tile size.
///
/// # Example
///
/// ```
/// use slo3d::level::LevelMapper;
///
/// let resolved = LevelMapper::standard().resolve(7).unwrap();
/// assert_eq!(resolved.storage_level, 3);
/// assert_eq!(resolved.tile_dim, 8);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LevelMapper {
    levels: &'static [(DetailLevel, StorageLevel)],
    dimensions: &'static [(StorageLevel, u32)],
}

impl LevelMapper {
    /// Mapper over the production tables.
    pub const fn standard() -> Self {
        Self::new(DETAIL_LEVELS, TILE_DIMENSIONS)
    }

    /// Mapper over custom tables.
    pub const fn new(
        levels: &'static [(DetailLevel, StorageLevel)],
        dimensions: &'static [(StorageLevel, u32)],
    ) -> Self {
        Self { levels, dimensions }
    }

    /// Resolve a detail level to its storage level and tile pixel size.
    ///
    /// # Errors
    ///
    /// - [`LevelError::UnknownLevel`] if the detail level is not mapped
    /// - [`LevelError::UnknownStorageLevel`] if the tables disagree
    pub fn resolve(&self, detail_level: DetailLevel) -> Result<LevelResolution, LevelError> {
        let storage_level = self
            .levels
            .iter()
            .find(|(detail, _)| *detail == detail_level)
            .map(|(_, storage)| *storage)
            .ok_or(LevelError::UnknownLevel(detail_level))?;

        let tile_dim = self.tile_dim(storage_level).ok_or(LevelError::UnknownStorageLevel {
            detail_level,
            storage_level,
        })?;

        Ok(LevelResolution {
            storage_level,
            tile_dim,
        })
    }

    /// Tile pixel size for a storage level, if known.
    pub fn tile_dim(&self, storage_level: StorageLevel) -> Option<u32> {
        self.dimensions
            .iter()
            .find(|(storage, _)| *storage == storage_level)
            .map(|(_, dim)| *dim)
    }

    /// All detail levels this mapper accepts, in table order.
    pub fn detail_levels(&self) -> impl Iterator<Item = DetailLevel> + '_ {
        self.levels.iter().map(|(detail, _)| *detail)
    }
}

impl Default for LevelMapper {
    fn default() -> Self {
        Self::standard()
    }
}
