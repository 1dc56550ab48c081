//! catalog-kit - embedding quantization and filename join keys for course catalogs
//!
//! Two independent pieces, plus batch tooling over JSON documents:
//!
//! - **Vector codec**: double-precision embeddings → half-precision,
//!   little-endian, base64 strings (a quarter of the raw JSON size or less).
//! - **Filename keys**: `100.01_18_BlueprintEditor_55.mp4` →
//!   `("100_01", "18_BlueprintEditor")`, used to join media files to the
//!   course catalog.
//!
//! # Quick Start
//!
//! ```
//! use catalog_kit::{decode, encode, extract_key};
//!
//! let encoded = encode(&[1.0, 2.0, 3.0]).unwrap();
//! assert_eq!(encoded, "ADwAQABC");
//! assert_eq!(decode(&encoded, 3).unwrap(), vec![1.0, 2.0, 3.0]);
//!
//! let key = extract_key("112.02_03_Night_Lighting.mp4").unwrap();
//! assert_eq!(key.lookup_key(), "112_02/03_Night_Lighting");
//! ```
//!
//! # Architecture
//!
//! The facade re-exports the component crates:
//! `catalog-core` (types, errors), `catalog-codec`, `catalog-keys` and
//! `catalog-engine` (config, document store, batch operations). The
//! `catalog` binary lives in `catalog-cli`.

pub use catalog_codec::{
    codec_for_dtype, decode, encode, f16_bits_to_f64, f64_to_f16_bits, get_codec, CodecError,
    DecodingError, EncodingError, HalfCodec, SingleCodec, VectorCodec, HALF_CODEC_ID,
    SINGLE_CODEC_ID,
};
pub use catalog_core::{
    CatalogError, CatalogResult, ElementDtype, Embedding, FilenameKey, Limits, LookupKeyError,
    DEFAULT_DIMENSION, LOOKUP_KEY_SEPARATOR,
};
pub use catalog_engine::{
    build_lookup, build_lookup_with, dequantize_document, load_json, lookup_table_json,
    quantize_document, read_embedding, validate_document, write_json_atomic, BatchReport,
    CatalogConfig, DocumentStore, EmbeddingOptions, ItemFailure, JsonFormat, LookupConfig,
    LookupOptions, LookupReport, ValidationReport, CONFIG_FILE_NAME,
};
pub use catalog_keys::{
    default_patterns, extract_key, extract_lookup_key, strip_extension, DuplicateKey, KeyExtractor,
    KeyPattern, LookupBuild, MediaLookup, PatternError,
};
