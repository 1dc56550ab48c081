//! Batch operations over catalog documents
//!
//! This crate ties the codec and key extraction crates to files on disk:
//! - Config: `catalog.toml` corpus settings
//! - DocumentStore: load a JSON document, edit in memory, save atomically
//! - Embedding batches: quantize, dequantize and validate segment documents
//! - Lookup: media catalog → `"<course_code>/<sub_key>"` table
//!
//! Every batch operation reports per-record failures instead of aborting.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod embedding;
pub mod lookup;
pub mod report;
pub mod store;

pub use config::{CatalogConfig, LookupConfig, CONFIG_FILE_NAME};
pub use embedding::{
    dequantize_document, parse_raw_vector, quantize_document, read_embedding, validate_document,
    EmbeddingOptions,
};
pub use lookup::{build_lookup, build_lookup_with, lookup_table_json, LookupOptions, LookupReport};
pub use report::{BatchReport, ItemFailure, ValidationReport};
pub use store::{load_json, write_json_atomic, DocumentStore, JsonFormat};
