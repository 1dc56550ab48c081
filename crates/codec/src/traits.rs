//! Vector codec trait and error definitions.

use catalog_core::{CatalogError, ElementDtype};
use thiserror::Error;

/// Vector codec trait.
///
/// Turns a double-precision embedding into a printable string and back.
/// Encoding may lose precision; decoding must accept anything the same
/// codec produced.
///
/// # Thread Safety
///
/// Codecs hold no state and must be `Send + Sync` so a batch can be
/// sharded across worker threads sharing one codec.
pub trait VectorCodec: Send + Sync {
    /// Encode a vector.
    ///
    /// Fails for an empty vector or any non-finite element. A codec whose
    /// element type has a narrower range also fails with
    /// `EncodingError::OutOfRange` for finite values it cannot hold
    /// (above 65504 in magnitude for half precision).
    fn encode(&self, vector: &[f64]) -> Result<String, EncodingError>;

    /// Decode a string produced by `encode`.
    ///
    /// When `expected_dim` is given the decoded element count must match it.
    /// Elements that decode to NaN or infinity fail with
    /// `DecodingError::NonFinite`.
    fn decode(&self, encoded: &str, expected_dim: Option<usize>) -> Result<Vec<f64>, DecodingError>;

    /// Unique codec identifier.
    fn codec_id(&self) -> &str;

    /// Element width used by this codec.
    fn dtype(&self) -> ElementDtype;

    /// Length in characters of the encoding of an `n`-element vector.
    fn encoded_len(&self, n: usize) -> usize {
        (n * self.dtype().bytes_per_element() + 2) / 3 * 4
    }
}

/// Encode failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodingError {
    /// Vector has no elements
    #[error("cannot encode an empty vector")]
    Empty,

    /// NaN or infinite element
    #[error("element {index} is not finite ({value})")]
    NonFinite {
        /// Position of the element
        index: usize,
        /// The offending value
        value: f64,
    },

    /// Finite element that the target precision cannot represent
    #[error("element {index} ({value}) is outside the {dtype} range")]
    OutOfRange {
        /// Position of the element
        index: usize,
        /// The offending value
        value: f64,
        /// Target element width
        dtype: ElementDtype,
    },
}

/// Decode failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodingError {
    /// Input is not valid standard base64
    #[error("invalid base64: {0}")]
    InvalidBase64(String),

    /// Input decodes to zero bytes
    #[error("encoded vector is empty")]
    Empty,

    /// Byte count is not a multiple of the element width
    #[error("decoded {len} bytes, not a multiple of {element_size}")]
    InvalidLength {
        /// Decoded byte count
        len: usize,
        /// Bytes per element
        element_size: usize,
    },

    /// Element count differs from the expected corpus dimension
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Decoded dimension
        got: usize,
    },

    /// Decoded element is NaN or infinite
    #[error("decoded element {index} is not finite")]
    NonFinite {
        /// Position of the element
        index: usize,
    },
}

/// Codec errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// Encoding failed
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// Decoding failed
    #[error("Decoding error: {0}")]
    Decoding(#[from] DecodingError),

    /// Unknown codec identifier.
    #[error("Unknown codec: {0}")]
    UnknownCodec(String),
}

// =============================================================================
// Conversion to CatalogError
// =============================================================================

impl From<EncodingError> for CatalogError {
    fn from(e: EncodingError) -> Self {
        CatalogError::Encoding {
            message: e.to_string(),
        }
    }
}

impl From<DecodingError> for CatalogError {
    fn from(e: DecodingError) -> Self {
        match e {
            DecodingError::DimensionMismatch { expected, got } => {
                CatalogError::DimensionMismatch { expected, got }
            }
            other => CatalogError::Decoding {
                message: other.to_string(),
            },
        }
    }
}

impl From<CodecError> for CatalogError {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::Encoding(e) => e.into(),
            CodecError::Decoding(e) => e.into(),
            CodecError::UnknownCodec(id) => {
                CatalogError::invalid_input(format!("Unknown codec: {}", id))
            }
        }
    }
}
