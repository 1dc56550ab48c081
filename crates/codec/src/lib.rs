//! Embedding vector codec.
//!
//! Converts double-precision embedding vectors to a compact printable form
//! and back. The default codec rounds every element to IEEE 754 binary16,
//! packs the halves little-endian and base64-encodes the bytes:
//!
//! ```text
//! [f64; N] -> [u16; N] (binary16 bits) -> 2N bytes LE -> base64 (padded, no wrap)
//! ```
//!
//! Decoding reverses the pipeline and widens each half back to f64. The
//! round trip loses at most half a binary16 ULP per element.
//!
//! # Usage
//!
//! ```
//! use catalog_codec::{decode, encode};
//!
//! let encoded = encode(&[1.0, 2.0, 3.0]).unwrap();
//! let decoded = decode(&encoded, 3).unwrap();
//! assert_eq!(decoded, vec![1.0, 2.0, 3.0]);
//!
//! assert!(decode(&encoded, 4).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod half_codec;
mod packing;
pub mod precision;
mod single_codec;
mod traits;

pub use half_codec::{HalfCodec, HALF_CODEC_ID};
pub use precision::{f16_bits_to_f64, f64_to_f16_bits};
pub use single_codec::{SingleCodec, SINGLE_CODEC_ID};
pub use traits::{CodecError, DecodingError, EncodingError, VectorCodec};

use catalog_core::ElementDtype;

static HALF: HalfCodec = HalfCodec;
static SINGLE: SingleCodec = SingleCodec;

/// Encode a vector with the default half-precision codec.
pub fn encode(vector: &[f64]) -> Result<String, EncodingError> {
    HALF.encode(vector)
}

/// Decode a half-precision encoded vector of `expected_dim` elements.
pub fn decode(encoded: &str, expected_dim: usize) -> Result<Vec<f64>, DecodingError> {
    HALF.decode(encoded, Some(expected_dim))
}

/// Get a codec by its identifier.
///
/// Returns the codec if recognized, or an error for unknown codec IDs.
///
/// # Known Codecs
///
/// - `"f16-le-base64"`: half precision (default)
/// - `"f32-le-base64"`: single precision
pub fn get_codec(codec_id: &str) -> Result<Box<dyn VectorCodec>, CodecError> {
    match codec_id {
        HALF_CODEC_ID => Ok(Box::new(HalfCodec)),
        SINGLE_CODEC_ID => Ok(Box::new(SingleCodec)),
        _ => Err(CodecError::UnknownCodec(codec_id.to_string())),
    }
}

/// Shared codec instance for an element width.
pub fn codec_for_dtype(dtype: ElementDtype) -> &'static dyn VectorCodec {
    match dtype {
        ElementDtype::F16 => &HALF,
        ElementDtype::F32 => &SINGLE,
    }
}
