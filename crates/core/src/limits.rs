//! Dimension limits and fixed constants
//!
//! Every vector in a corpus shares one dimensionality. The default matches
//! the 768-wide sentence embeddings the catalog was built with.

use crate::error::{CatalogError, CatalogResult};

/// Default embedding dimension for a corpus
pub const DEFAULT_DIMENSION: usize = 768;

/// Separator between course code and sub-key in a lookup key
pub const LOOKUP_KEY_SEPARATOR: char = '/';

/// Size limits for corpus configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum vector dimension (default: 8192)
    pub max_vector_dim: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_vector_dim: 8192,
        }
    }
}

impl Limits {
    /// Validate a configured corpus dimension
    ///
    /// A dimension must be at least 1 and no larger than `max_vector_dim`.
    pub fn validate_dimension(&self, dimension: usize) -> CatalogResult<()> {
        if dimension == 0 || dimension > self.max_vector_dim {
            return Err(CatalogError::invalid_input(format!(
                "Invalid dimension: {} (must be 1..={})",
                dimension, self.max_vector_dim
            )));
        }
        Ok(())
    }
}
