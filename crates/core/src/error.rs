//! Error types for catalog-kit
//!
//! This module defines the top-level error used by the batch and CLI layers.
//! Component crates keep their own narrow error enums (the codec has
//! `EncodingError` / `DecodingError`) and convert into `CatalogError` at the
//! boundary. We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.

use std::io;
use thiserror::Error;

/// Result type alias for catalog operations
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Error types for catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON document could not be parsed or produced
    #[error("Serialization error: {message}")]
    Serialization {
        /// What went wrong
        message: String,
    },

    /// An embedding could not be encoded
    #[error("Encoding error: {message}")]
    Encoding {
        /// What went wrong
        message: String,
    },

    /// An encoded embedding could not be decoded
    #[error("Decoding error: {message}")]
    Decoding {
        /// What went wrong
        message: String,
    },

    /// Vector dimension doesn't match the corpus dimension
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        got: usize,
    },

    /// A document or record was not found
    #[error("Not found: {what}")]
    NotFound {
        /// Description of the missing entity
        what: String,
    },

    /// Invalid input (bad config value, malformed document shape)
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What went wrong
        message: String,
    },
}

impl CatalogError {
    /// Create an `InvalidInput` error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CatalogError::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a `Serialization` error
    pub fn serialization(message: impl Into<String>) -> Self {
        CatalogError::Serialization {
            message: message.into(),
        }
    }

    /// Create a `NotFound` error
    pub fn not_found(what: impl Into<String>) -> Self {
        CatalogError::NotFound { what: what.into() }
    }

    /// True for per-item codec failures that a batch loop may skip over
    pub fn is_item_error(&self) -> bool {
        matches!(
            self,
            CatalogError::Encoding { .. }
                | CatalogError::Decoding { .. }
                | CatalogError::DimensionMismatch { .. }
        )
    }
}
