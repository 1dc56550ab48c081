//! Single-precision codec.
//!
//! Same framing as the half codec with 4-byte elements. Used for corpora
//! where the extra precision is worth doubling the stored size.

use crate::packing::{check_decoded, check_encodable, from_base64, to_base64};
use crate::traits::{DecodingError, EncodingError, VectorCodec};
use byteorder::{ByteOrder, LittleEndian};
use catalog_core::ElementDtype;

/// Codec identifier stored alongside encoded corpora.
pub const SINGLE_CODEC_ID: &str = "f32-le-base64";

/// Single-precision little-endian base64 codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleCodec;

impl VectorCodec for SingleCodec {
    fn encode(&self, vector: &[f64]) -> Result<String, EncodingError> {
        check_encodable(vector)?;

        let mut singles = Vec::with_capacity(vector.len());
        for (index, &value) in vector.iter().enumerate() {
            let narrowed = value as f32;
            if !narrowed.is_finite() {
                return Err(EncodingError::OutOfRange {
                    index,
                    value,
                    dtype: ElementDtype::F32,
                });
            }
            singles.push(narrowed);
        }

        let mut bytes = vec![0u8; singles.len() * 4];
        LittleEndian::write_f32_into(&singles, &mut bytes);
        Ok(to_base64(&bytes))
    }

    fn decode(&self, encoded: &str, expected_dim: Option<usize>) -> Result<Vec<f64>, DecodingError> {
        let bytes = from_base64(encoded, 4, expected_dim)?;

        let mut singles = vec![0f32; bytes.len() / 4];
        LittleEndian::read_f32_into(&bytes, &mut singles);

        let vector: Vec<f64> = singles.into_iter().map(f64::from).collect();
        check_decoded(&vector)?;
        Ok(vector)
    }

    fn codec_id(&self) -> &str {
        SINGLE_CODEC_ID
    }

    fn dtype(&self) -> ElementDtype {
        ElementDtype::F32
    }
}
