//! Parameter parsing for `/heightmaps`.
//!
//! Parameters may arrive in the query string, in an urlencoded POST body,
//! or split between both. Body values are seen first and the first value
//! of a repeated key wins.

use thiserror::Error;

use crate::level::DetailLevel;

/// Rejected request parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Bad request - form data is of wrong type.")]
pub struct ValidationError {
    /// The first field that was missing or malformed.
    pub field: &'static str,
}

/// Raw parameters as sent by the client.
///
/// Fields stay strings so that a malformed value produces our own
/// [`ValidationError`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeightMapParams {
    pub x: Option<String>,
    pub y: Option<String>,
    pub dim: Option<String>,
    pub level_id: Option<String>,
}

/// Type-checked request parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightMapRequest {
    pub x: f64,
    pub y: f64,
    pub dim: i64,
    pub level_id: DetailLevel,
}

impl HeightMapParams {
    /// Collect parameters from an urlencoded body and query string.
    ///
    /// Decoding is lossy and never fails; undecodable values surface later
    /// as a [`ValidationError`] from [`parse`](Self::parse). Unknown keys are
    /// ignored.
    pub fn from_urlencoded(body: &[u8], query: &[u8]) -> Self {
        let mut params = Self::default();
        let pairs = form_urlencoded::parse(body).chain(form_urlencoded::parse(query));
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "x" => &mut params.x,
                "y" => &mut params.y,
                "dim" => &mut params.dim,
                "levelId" => &mut params.level_id,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }

    /// Parse every field.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming the first missing or malformed field.
    pub fn parse(&self) -> Result<HeightMapRequest, ValidationError> {
        Ok(HeightMapRequest {
            x: field(&self.x, "x")?,
            y: field(&self.y, "y")?,
            dim: field(&self.dim, "dim")?,
            level_id: field(&self.level_id, "levelId")?,
        })
    }
}

fn field<T: std::str::FromStr>(
    raw: &Option<String>,
    name: &'static str,
) -> Result<T, ValidationError> {
    raw.as_deref()
        .map(str::trim)
        .and_then(|v| v.parse().ok())
        .ok_or(ValidationError { field: name })
}
