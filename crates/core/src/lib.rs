//! Core types for catalog-kit
//!
//! This crate defines the foundational types shared by the codec, key
//! extraction and batch crates:
//! - FilenameKey: (course code, sub-key) join key derived from a file name
//! - ElementDtype: element width of an encoded embedding vector
//! - Limits: default dimension and size limits
//! - CatalogError: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;
pub mod types;

pub use error::{CatalogError, CatalogResult};
pub use limits::{Limits, DEFAULT_DIMENSION, LOOKUP_KEY_SEPARATOR};
pub use types::{ElementDtype, Embedding, FilenameKey, LookupKeyError};
