//! Raster codec for tiles and responses.
//!
//! Tiles are stored as PNG and responses are returned as PNG. Encoding goes
//! through the [`RasterEncoder`] trait so the HTTP layer does not depend on a
//! concrete format:
//!
//! ```text
//! ┌─────────────────────┐
//! │    HTTP handler     │
//! │                     │
//! │ Arc<dyn RasterEncoder>
//! └──────────┬──────────┘
//!            ▼
//! ┌─────────────────────┐
//! │   RasterEncoder     │ (trait)
//! └──────────┬──────────┘
//!            ▼
//!      ┌────────────┐
//!      │ PngEncoder │
//!      └────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use slo3d::codec::{PngEncoder, RasterEncoder};
//! use image::RgbaImage;
//!
//! let encoder = PngEncoder::default();
//! let bytes = encoder.encode(&RgbaImage::new(8, 8)).unwrap();
//! assert_eq!(&bytes[1..4], b"PNG");
//! ```

mod encoder;
mod error;
mod png;

pub use encoder::RasterEncoder;
pub use error::CodecError;
pub use png::{decode_png, PngCompression, PngEncoder};
