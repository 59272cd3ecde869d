//! slo3d - Height-map crops served from a pre-rendered tile pyramid
//!
//! This library assembles arbitrary square regions of the planar world
//! coordinate space from 1000×1000 world-unit PNG tiles stored on disk,
//! and serves the result over HTTP.
//!
//! # Pipeline
//!
//! ```text
//! request ──► Compositor ──► Cropper ──► RasterEncoder ──► response
//!               │     │
//!               │     └──► TileLoader (one call per covering tile)
//!               └──► LevelMapper (detail level → storage level, tile size)
//! ```

pub mod codec;
pub mod compositor;
pub mod config;
pub mod coord;
pub mod crop;
pub mod heightmap;
pub mod level;
pub mod logging;
pub mod server;
pub mod tile;

/// Crate version, reported by the CLI banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use heightmap::{HeightMapError, HeightMapService};
