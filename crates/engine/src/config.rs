//! Corpus configuration via `catalog.toml`
//!
//! A single optional config file next to the catalog data. Every field has a
//! default, so an empty file (or no file) gives the standard 768-wide
//! half-precision corpus. Command-line flags override file values.

use crate::embedding::EmbeddingOptions;
use crate::lookup::LookupOptions;
use catalog_codec::{codec_for_dtype, VectorCodec};
use catalog_core::{CatalogError, CatalogResult, ElementDtype, Limits, DEFAULT_DIMENSION};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "catalog.toml";

/// Field names used to read a media catalog.
///
/// Persisted in `catalog.toml` under the `[lookup]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LookupConfig {
    /// Entry field holding the media file name (default: "name")
    #[serde(default = "default_name_field")]
    pub name_field: String,
    /// Entry field holding the media id (default: "id")
    #[serde(default = "default_id_field")]
    pub id_field: String,
}

fn default_name_field() -> String {
    "name".to_string()
}

fn default_id_field() -> String {
    "id".to_string()
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            name_field: default_name_field(),
            id_field: default_id_field(),
        }
    }
}

/// Corpus configuration loaded from `catalog.toml`.
///
/// # Example
///
/// ```toml
/// # Embedding dimension shared by every vector (0 = don't check)
/// dimension = 768
///
/// # Element width of encoded vectors: "f16" (default) or "f32"
/// dtype = "f16"
///
/// # [lookup]
/// # name_field = "name"
/// # id_field = "id"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Corpus dimension; `0` disables the dimension check.
    #[serde(default = "default_dimension")]
    pub dimension: usize,
    /// Element width: `"f16"` or `"f32"`.
    #[serde(default = "default_dtype_str")]
    pub dtype: String,
    /// Record field holding the embedding.
    #[serde(default = "default_embedding_field")]
    pub embedding_field: String,
    /// Process records on the rayon thread pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Media catalog field names.
    #[serde(default)]
    pub lookup: LookupConfig,
}

fn default_dimension() -> usize {
    DEFAULT_DIMENSION
}

fn default_dtype_str() -> String {
    ElementDtype::default().as_str().to_string()
}

fn default_embedding_field() -> String {
    "embedding".to_string()
}

fn default_parallel() -> bool {
    true
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            dimension: default_dimension(),
            dtype: default_dtype_str(),
            embedding_field: default_embedding_field(),
            parallel: default_parallel(),
            lookup: LookupConfig::default(),
        }
    }
}

impl CatalogConfig {
    /// Parse the dtype string into an `ElementDtype`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"f16"` or `"f32"`.
    pub fn element_dtype(&self) -> CatalogResult<ElementDtype> {
        self.dtype.parse().map_err(|e: String| {
            CatalogError::invalid_input(format!("Invalid dtype in {}: {}", CONFIG_FILE_NAME, e))
        })
    }

    /// Codec for the configured dtype.
    pub fn codec(&self) -> CatalogResult<&'static dyn VectorCodec> {
        Ok(codec_for_dtype(self.element_dtype()?))
    }

    /// Dimension to enforce, if any.
    pub fn expected_dimension(&self) -> Option<usize> {
        match self.dimension {
            0 => None,
            d => Some(d),
        }
    }

    /// Check every field that has a constrained value.
    pub fn validate(&self) -> CatalogResult<()> {
        self.element_dtype()?;
        if let Some(dimension) = self.expected_dimension() {
            Limits::default().validate_dimension(dimension)?;
        }
        if self.embedding_field.is_empty() {
            return Err(CatalogError::invalid_input("embedding_field must not be empty"));
        }
        Ok(())
    }

    /// Options for quantize / dequantize / validate.
    pub fn embedding_options(&self) -> CatalogResult<EmbeddingOptions> {
        Ok(EmbeddingOptions {
            dtype: self.element_dtype()?,
            dimension: self.expected_dimension(),
            field: self.embedding_field.clone(),
            parallel: self.parallel,
        })
    }

    /// Options for lookup building.
    pub fn lookup_options(&self) -> LookupOptions {
        LookupOptions {
            name_field: self.lookup.name_field.clone(),
            id_field: self.lookup.id_field.clone(),
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Catalog corpus configuration
#
# Embedding dimension shared by every vector in the corpus.
# 0 disables the dimension check.
dimension = 768

# Element width of encoded vectors: "f16" (default) or "f32"
#   "f16" = 2 bytes per element, ~3 significant digits
#   "f32" = 4 bytes per element, exact for single-precision input
dtype = "f16"

# Record field holding the embedding in segment documents.
embedding_field = "embedding"

# Process records on all cores.
parallel = true

# Media catalog field names used when building lookup tables.
# [lookup]
# name_field = "name"
# id_field = "id"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> CatalogResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CatalogError::invalid_input(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: CatalogConfig = toml::from_str(&content).map_err(|e| {
            CatalogError::invalid_input(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise the defaults.
    pub fn load_or_default(path: &Path) -> CatalogResult<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `true` when the file was created.
    pub fn write_default_if_missing(path: &Path) -> CatalogResult<bool> {
        if path.exists() {
            return Ok(false);
        }
        std::fs::write(path, Self::default_toml())?;
        Ok(true)
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> CatalogResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            CatalogError::serialization(format!("Failed to serialize config: {}", e))
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
