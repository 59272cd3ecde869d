//! Error types for raster encode/decode.

use thiserror::Error;

/// Errors that can occur while encoding or decoding rasters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Raster dimensions cannot be encoded.
    #[error("Invalid dimensions {width}×{height}: {reason}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        reason: String,
    },

    /// The encoder failed.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// The bytes are not a valid image of the expected format.
    #[error("Decoding failed: {0}")]
    DecodingFailed(String),
}
