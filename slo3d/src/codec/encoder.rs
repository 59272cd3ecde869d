//! Encoder trait.

use image::RgbaImage;

use crate::codec::CodecError;

/// Encodes a composed raster into response bytes.
///
/// Implementations must be `Send + Sync` so one encoder can be shared by
/// every request handler.
pub trait RasterEncoder: Send + Sync {
    /// Encode the raster into a complete file.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if the raster cannot be serialized.
    fn encode(&self, image: &RgbaImage) -> Result<Vec<u8>, CodecError>;

    /// MIME type of the encoded output.
    fn content_type(&self) -> &str;
}
