//! Tile loading
//!
//! A tile is one `tile_dim × tile_dim` PNG raster covering a
//! [`TILE_SIZE`](crate::coord::TILE_SIZE) square of world space. Tiles live
//! at `<tile-root>/<storage-level>/<grid-x>_<grid-y>.png`.
//!
//! Loading a single tile can fail in ways the compositor recovers from
//! (missing file, undecodable bytes, tile outside the service bounds); these
//! are distinct [`TileLoadError`] variants so callers can decide per case.

mod disk;
mod error;
mod loader;

pub use disk::{tile_path, DiskTileLoader};
pub use error::TileLoadError;
pub use loader::TileLoader;
