//! PNG encoder and decoder.

use std::str::FromStr;

use image::codecs::png::{CompressionType, FilterType, PngEncoder as ImagePngEncoder};
use image::{ExtendedColorType, ImageEncoder, ImageFormat, RgbaImage};

use crate::codec::{CodecError, RasterEncoder};

/// PNG compression effort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PngCompression {
    /// Fastest encoding, larger files.
    #[default]
    Fast,
    /// Balanced.
    Default,
    /// Smallest files, slowest encoding.
    Best,
}

impl From<PngCompression> for CompressionType {
    fn from(compression: PngCompression) -> Self {
        match compression {
            PngCompression::Fast => CompressionType::Fast,
            PngCompression::Default => CompressionType::Default,
            PngCompression::Best => CompressionType::Best,
        }
    }
}

impl FromStr for PngCompression {
    type Err = String;

    /// Parse `fast`, `default` or `best`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fast" => Ok(PngCompression::Fast),
            "default" => Ok(PngCompression::Default),
            "best" => Ok(PngCompression::Best),
            other => Err(format!("unknown PNG compression: {}", other)),
        }
    }
}

/// RGBA PNG encoder.
///
/// # Example
///
/// ```
/// use slo3d::codec::{PngCompression, PngEncoder, RasterEncoder};
///
/// let encoder = PngEncoder::new(PngCompression::Best);
/// assert_eq!(encoder.content_type(), "image/png");
/// assert_eq!(encoder.compression(), PngCompression::Best);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PngEncoder {
    compression: PngCompression,
}

impl PngEncoder {
    pub fn new(compression: PngCompression) -> Self {
        Self { compression }
    }

    /// Get the compression effort.
    pub fn compression(&self) -> PngCompression {
        self.compression
    }
}

impl RasterEncoder for PngEncoder {
    fn encode(&self, image: &RgbaImage) -> Result<Vec<u8>, CodecError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(CodecError::InvalidDimensions {
                width,
                height,
                reason: "empty raster".to_string(),
            });
        }

        let mut out = Vec::new();
        ImagePngEncoder::new_with_quality(&mut out, self.compression.into(), FilterType::Adaptive)
            .write_image(image.as_raw(), width, height, ExtendedColorType::Rgba8)
            .map_err(|e| CodecError::EncodingFailed(e.to_string()))?;
        Ok(out)
    }

    fn content_type(&self) -> &str {
        "image/png"
    }
}

/// Decode PNG bytes into an 8-bit RGBA raster.
///
/// Grayscale and 16-bit tiles are converted to RGBA8.
///
/// # Errors
///
/// Returns [`CodecError::DecodingFailed`] if the bytes are not a valid PNG.
pub fn decode_png(bytes: &[u8]) -> Result<RgbaImage, CodecError> {
    image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map(|img| img.to_rgba8())
        .map_err(|e| CodecError::DecodingFailed(e.to_string()))
}
