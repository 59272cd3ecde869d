//! Per-tile load errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::coord::TileCoord;

/// Why a single tile could not be loaded.
///
/// None of these abort a composition; the compositor leaves the tile's
/// canvas area blank.
#[derive(Debug, Error)]
pub enum TileLoadError {
    /// The tile's world origin lies outside the service bounding box.
    #[error("Tile {tile:?} is outside the service bounds")]
    OutOfRange { tile: TileCoord },

    /// No file exists at the tile's path.
    #[error("Tile not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but could not be read.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a decodable PNG.
    #[error("Failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    /// The decoded raster does not match the level's tile size.
    #[error("Tile {} is {width}×{height}, expected {expected}×{expected}", path.display())]
    UnexpectedSize {
        path: PathBuf,
        width: u32,
        height: u32,
        expected: u32,
    },
}

impl TileLoadError {
    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            TileLoadError::OutOfRange { .. } => "out_of_range",
            TileLoadError::NotFound { .. } => "not_found",
            TileLoadError::Io { .. } => "io",
            TileLoadError::Decode { .. } => "decode",
            TileLoadError::UnexpectedSize { .. } => "unexpected_size",
        }
    }
}
