//! Shared base64 framing for the fixed-width codecs.
//!
//! Encoded form: elements packed little-endian back to back, then standard
//! base64 with padding and no line breaks.

use crate::traits::{DecodingError, EncodingError};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Reject empty vectors and non-finite elements.
pub(crate) fn check_encodable(vector: &[f64]) -> Result<(), EncodingError> {
    if vector.is_empty() {
        return Err(EncodingError::Empty);
    }
    match vector.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(EncodingError::NonFinite {
            index,
            value: vector[index],
        }),
        None => Ok(()),
    }
}

pub(crate) fn to_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decode base64 and validate the byte count.
///
/// Returns the raw bytes; their length is a positive multiple of
/// `element_size` and, when `expected_dim` is set, equals
/// `expected_dim * element_size`.
pub(crate) fn from_base64(
    encoded: &str,
    element_size: usize,
    expected_dim: Option<usize>,
) -> Result<Vec<u8>, DecodingError> {
    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(|e| DecodingError::InvalidBase64(e.to_string()))?;

    if bytes.is_empty() {
        return Err(DecodingError::Empty);
    }
    if bytes.len() % element_size != 0 {
        return Err(DecodingError::InvalidLength {
            len: bytes.len(),
            element_size,
        });
    }
    let got = bytes.len() / element_size;
    if let Some(expected) = expected_dim {
        if got != expected {
            return Err(DecodingError::DimensionMismatch { expected, got });
        }
    }
    Ok(bytes)
}

/// Reject decoded vectors carrying NaN or infinity.
pub(crate) fn check_decoded(vector: &[f64]) -> Result<(), DecodingError> {
    match vector.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(DecodingError::NonFinite { index }),
        None => Ok(()),
    }
}
