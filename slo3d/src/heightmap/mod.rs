//! Height-map generation
//!
//! [`HeightMapService`] is the single entry point used by the HTTP layer:
//! compose the covering canvas, crop it to the requested region, and encode
//! the result.
//!
//! # Example
//!
//! ```
//! use slo3d::HeightMapService;
//!
//! let service = HeightMapService::from_tiles_dir("/nonexistent/tiles");
//!
//! // Every tile is missing, so the crop is blank but correctly sized.
//! let image = service.generate(374000.0, 31000.0, 1000, 7).unwrap();
//! assert_eq!(image.dimensions(), (8, 8));
//!
//! // Regions outside the service bounds are rejected.
//! assert!(service.generate(373999.0, 31000.0, 1000, 7).is_err());
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use image::RgbaImage;
use thiserror::Error;
use tracing::{debug, warn};

use crate::codec::{CodecError, PngEncoder, RasterEncoder};
use crate::compositor::{ComposeError, Compositor};
use crate::coord::WorldRegion;
use crate::crop::crop;
use crate::level::DetailLevel;
use crate::tile::DiskTileLoader;

/// Errors from height-map generation.
#[derive(Debug, Error)]
pub enum HeightMapError {
    /// The request was rejected before or during composition.
    #[error(transparent)]
    Compose(#[from] ComposeError),

    /// The cropped raster could not be encoded.
    #[error("Failed to encode height map: {0}")]
    Encode(#[from] CodecError),
}

impl HeightMapError {
    /// Whether the error is caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, HeightMapError::Compose(_))
    }
}

/// Composes, crops and encodes height maps.
///
/// Cheap to share: wrap in an `Arc` and call from any thread. All work is
/// blocking, so async callers should use `spawn_blocking`.
pub struct HeightMapService {
    compositor: Compositor,
    encoder: Arc<dyn RasterEncoder>,
}

impl HeightMapService {
    pub fn new(compositor: Compositor, encoder: Arc<dyn RasterEncoder>) -> Self {
        Self {
            compositor,
            encoder,
        }
    }

    /// Service over a PNG pyramid on disk with default settings.
    pub fn from_tiles_dir(tiles_dir: impl Into<PathBuf>) -> Self {
        let loader = Arc::new(DiskTileLoader::new(tiles_dir));
        Self::new(Compositor::new(loader), Arc::new(PngEncoder::default()))
    }

    /// Generate the height map for a square region.
    ///
    /// # Arguments
    ///
    /// * `x0`, `y0` - Lower-left corner in world units
    /// * `dim` - Edge length in world units
    /// * `detail_level` - Client-facing level of detail
    ///
    /// # Errors
    ///
    /// Returns [`HeightMapError::Compose`] if the region is out of range,
    /// the level is unknown, or the canvas would be too large. Missing
    /// tiles are not errors; their area is transparent.
    pub fn generate(
        &self,
        x0: f64,
        y0: f64,
        dim: i64,
        detail_level: DetailLevel,
    ) -> Result<RgbaImage, HeightMapError> {
        let region = WorldRegion::new(x0, y0, dim);
        let composite = self.compositor.compose(&region, detail_level)?;
        let image = crop(&composite, &region);

        debug!(
            x0,
            y0,
            dim,
            detail_level,
            width = image.width(),
            blank_tiles = composite.stats.blank(),
            "Height map generated"
        );
        Ok(image)
    }

    /// Generate and encode the height map.
    ///
    /// # Errors
    ///
    /// As [`generate`](Self::generate), plus [`HeightMapError::Encode`].
    pub fn render(
        &self,
        x0: f64,
        y0: f64,
        dim: i64,
        detail_level: DetailLevel,
    ) -> Result<Vec<u8>, HeightMapError> {
        let image = self.generate(x0, y0, dim, detail_level)?;
        self.encoder.encode(&image).map_err(|e| {
            warn!(x0, y0, dim, detail_level, error = %e, "Encoding failed");
            HeightMapError::Encode(e)
        })
    }

    /// MIME type of [`render`](Self::render) output.
    pub fn content_type(&self) -> &str {
        self.encoder.content_type()
    }
}
