//! Half-precision codec.
//!
//! Default codec for stored embeddings. Each element is rounded to binary16,
//! cutting a 768-wide vector to 1536 bytes (2048 base64 characters).
//! Cosine ranking tolerates the precision loss.

use crate::packing::{check_decoded, check_encodable, from_base64, to_base64};
use crate::precision::{f16_bits_to_f64, f64_to_f16_bits, is_f16_non_finite};
use crate::traits::{DecodingError, EncodingError, VectorCodec};
use byteorder::{ByteOrder, LittleEndian};
use catalog_core::ElementDtype;

/// Codec identifier stored alongside encoded corpora.
pub const HALF_CODEC_ID: &str = "f16-le-base64";

/// Half-precision little-endian base64 codec.
///
/// # Example
///
/// ```
/// use catalog_codec::{HalfCodec, VectorCodec};
///
/// let codec = HalfCodec;
/// let encoded = codec.encode(&[1.0, -2.0, 0.5]).unwrap();
/// assert_eq!(encoded, "ADwAwAA4");
///
/// let decoded = codec.decode(&encoded, Some(3)).unwrap();
/// assert_eq!(decoded, vec![1.0, -2.0, 0.5]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HalfCodec;

impl VectorCodec for HalfCodec {
    fn encode(&self, vector: &[f64]) -> Result<String, EncodingError> {
        check_encodable(vector)?;

        let mut halves = Vec::with_capacity(vector.len());
        for (index, &value) in vector.iter().enumerate() {
            let bits = f64_to_f16_bits(value);
            if is_f16_non_finite(bits) {
                return Err(EncodingError::OutOfRange {
                    index,
                    value,
                    dtype: ElementDtype::F16,
                });
            }
            halves.push(bits);
        }

        let mut bytes = vec![0u8; halves.len() * 2];
        LittleEndian::write_u16_into(&halves, &mut bytes);
        Ok(to_base64(&bytes))
    }

    fn decode(&self, encoded: &str, expected_dim: Option<usize>) -> Result<Vec<f64>, DecodingError> {
        let bytes = from_base64(encoded, 2, expected_dim)?;

        let mut halves = vec![0u16; bytes.len() / 2];
        LittleEndian::read_u16_into(&bytes, &mut halves);

        let vector: Vec<f64> = halves.into_iter().map(f16_bits_to_f64).collect();
        check_decoded(&vector)?;
        Ok(vector)
    }

    fn codec_id(&self) -> &str {
        HALF_CODEC_ID
    }

    fn dtype(&self) -> ElementDtype {
        ElementDtype::F16
    }
}
