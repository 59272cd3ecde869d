//! Shared fixtures: an on-disk tile pyramid in a temporary directory.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use slo3d::coord::TileCoord;
use slo3d::tile::tile_path;
use tempfile::TempDir;

pub const BLANK: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Temporary static root with tiles under `data/tiles`.
pub struct TilePyramid {
    dir: TempDir,
}

impl TilePyramid {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn tiles_dir(&self) -> PathBuf {
        self.dir.path().join("data").join("tiles")
    }

    /// Write a tile raster as PNG.
    pub fn put(&self, storage_level: u32, grid_x: i64, grid_y: i64, image: &RgbaImage) -> PathBuf {
        let path = tile_path(&self.tiles_dir(), storage_level, TileCoord::new(grid_x, grid_y));
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        image.save(&path).unwrap();
        path
    }

    /// Write a solid-colour tile.
    pub fn put_solid(&self, storage_level: u32, tile_dim: u32, grid_x: i64, grid_y: i64, color: Rgba<u8>) {
        self.put(storage_level, grid_x, grid_y, &RgbaImage::from_pixel(tile_dim, tile_dim, color));
    }

    /// Write bytes that are not a PNG at a tile path.
    pub fn put_garbage(&self, storage_level: u32, grid_x: i64, grid_y: i64) {
        let path = tile_path(&self.tiles_dir(), storage_level, TileCoord::new(grid_x, grid_y));
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"\x89PNG but not really").unwrap();
    }
}

/// A tile whose every pixel is distinct, for exact-placement checks.
pub fn gradient_tile(tile_dim: u32, seed: u8) -> RgbaImage {
    RgbaImage::from_fn(tile_dim, tile_dim, |x, y| {
        Rgba([x as u8, y as u8, seed, 255])
    })
}

/// A distinct opaque colour per grid cell.
pub fn cell_color(grid_x: i64, grid_y: i64) -> Rgba<u8> {
    Rgba([(grid_x % 256) as u8, (grid_y % 256) as u8, 200, 255])
}
