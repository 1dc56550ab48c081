//! Filename → join key extraction.

use crate::pattern::{default_patterns, KeyPattern};
use catalog_core::FilenameKey;
use once_cell::sync::Lazy;

/// Longest suffix treated as a file extension.
const MAX_EXTENSION_LEN: usize = 5;

static DEFAULT_EXTRACTOR: Lazy<KeyExtractor> = Lazy::new(KeyExtractor::default);

/// Strip a trailing `.ext` from a file name.
///
/// Only a short alphanumeric suffix with at least one letter counts as an
/// extension, so a bare course stem like `100.01_18_Intro` is left alone.
pub fn strip_extension(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.bytes().all(|b| b.is_ascii_alphanumeric())
                && ext.bytes().any(|b| b.is_ascii_alphabetic()) =>
        {
            stem
        }
        _ => filename,
    }
}

/// Ordered list of patterns tried against a file stem
#[derive(Debug, Clone)]
pub struct KeyExtractor {
    patterns: Vec<KeyPattern>,
}

impl Default for KeyExtractor {
    fn default() -> Self {
        KeyExtractor::new(default_patterns())
    }
}

impl KeyExtractor {
    /// Create an extractor from patterns in priority order
    pub fn new(patterns: Vec<KeyPattern>) -> Self {
        KeyExtractor { patterns }
    }

    /// Patterns in the order they are tried
    pub fn patterns(&self) -> &[KeyPattern] {
        &self.patterns
    }

    /// Derive the join key for a file name.
    ///
    /// Returns `None` when no pattern matches; unrelated files are expected.
    pub fn extract(&self, filename: &str) -> Option<FilenameKey> {
        let stem = strip_extension(filename);
        self.patterns.iter().find_map(|p| p.match_stem(stem))
    }

    /// Like `extract`, also reporting which pattern matched
    pub fn extract_with_pattern(&self, filename: &str) -> Option<(FilenameKey, &str)> {
        let stem = strip_extension(filename);
        self.patterns
            .iter()
            .find_map(|p| p.match_stem(stem).map(|key| (key, p.name())))
    }
}

/// Extract a key with the built-in grammar.
pub fn extract_key(filename: &str) -> Option<FilenameKey> {
    DEFAULT_EXTRACTOR.extract(filename)
}

/// Extract the `"<course_code>/<sub_key>"` lookup string with the built-in grammar.
pub fn extract_lookup_key(filename: &str) -> Option<String> {
    extract_key(filename).map(|k| k.lookup_key())
}
