//! Filename join keys for the course catalog
//!
//! Media files follow a naming convention that embeds the course code and an
//! item descriptor:
//!
//! ```text
//! 100.01_18_BlueprintEditor_55.mp4  ->  ("100_01", "18_BlueprintEditor")
//! 112.02_03_Night_Lighting.mp4      ->  ("112_02", "03_Night_Lighting")
//! readme.txt                        ->  no key
//! ```
//!
//! The derived key joins the media catalog to the course catalog. Files
//! that don't follow the convention simply yield no key.
//!
//! # Example
//!
//! ```
//! use catalog_keys::extract_key;
//!
//! let key = extract_key("100.01_18_BlueprintEditor_55.mp4").unwrap();
//! assert_eq!(key.lookup_key(), "100_01/18_BlueprintEditor");
//! assert!(extract_key("readme.txt").is_none());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod extractor;
pub mod lookup;
pub mod pattern;

pub use extractor::{extract_key, extract_lookup_key, strip_extension, KeyExtractor};
pub use lookup::{DuplicateKey, LookupBuild, MediaLookup};
pub use pattern::{default_patterns, KeyPattern, PatternError, PLAIN_PATTERN, VERSIONED_PATTERN};
