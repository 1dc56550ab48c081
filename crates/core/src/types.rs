//! Core types for catalog-kit
//!
//! This module defines the foundational types:
//! - Embedding: a double-precision embedding vector
//! - FilenameKey: (course code, sub-key) join key
//! - ElementDtype: element width of an encoded vector

use crate::limits::LOOKUP_KEY_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An embedding vector as produced by the embedding model
pub type Embedding = Vec<f64>;

/// Join key derived from a structured media file name
///
/// The course code uses `_` in place of the dot from the file name
/// (`"100.01"` becomes `"100_01"`). The sub-key is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FilenameKey {
    /// Normalized course code, e.g. `100_01`
    pub course_code: String,
    /// Item within the course, e.g. `18_BlueprintEditor`
    pub sub_key: String,
}

/// Failure to parse a `"<course_code>/<sub_key>"` lookup key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupKeyError {
    /// No separator present
    #[error("lookup key '{0}' has no '/' separator")]
    MissingSeparator(String),

    /// One of the two halves is empty
    #[error("lookup key '{0}' has an empty component")]
    EmptyComponent(String),
}

impl FilenameKey {
    /// Create a key from already-normalized parts
    pub fn new(course_code: impl Into<String>, sub_key: impl Into<String>) -> Self {
        FilenameKey {
            course_code: course_code.into(),
            sub_key: sub_key.into(),
        }
    }

    /// Render the composite key used to index lookup tables
    pub fn lookup_key(&self) -> String {
        self.to_string()
    }

    /// Parse a composite lookup key back into its parts
    ///
    /// Splits on the first `/`; the sub-key may itself contain `/`.
    pub fn from_lookup_key(key: &str) -> Result<Self, LookupKeyError> {
        let (code, sub) = key
            .split_once(LOOKUP_KEY_SEPARATOR)
            .ok_or_else(|| LookupKeyError::MissingSeparator(key.to_string()))?;
        if code.is_empty() || sub.is_empty() {
            return Err(LookupKeyError::EmptyComponent(key.to_string()));
        }
        Ok(FilenameKey::new(code, sub))
    }
}

impl fmt::Display for FilenameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.course_code, LOOKUP_KEY_SEPARATOR, self.sub_key
        )
    }
}

/// Element width of an encoded embedding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementDtype {
    /// IEEE 754 binary16 (default)
    #[default]
    F16,
    /// IEEE 754 binary32
    F32,
}

impl ElementDtype {
    /// Bytes occupied by one element
    pub fn bytes_per_element(&self) -> usize {
        match self {
            ElementDtype::F16 => 2,
            ElementDtype::F32 => 4,
        }
    }

    /// Name used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementDtype::F16 => "f16",
            ElementDtype::F32 => "f32",
        }
    }
}

impl fmt::Display for ElementDtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementDtype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "f16" | "half" => Ok(ElementDtype::F16),
            "f32" | "single" => Ok(ElementDtype::F32),
            other => Err(format!(
                "unknown dtype '{}', expected \"f16\" or \"f32\"",
                other
            )),
        }
    }
}
