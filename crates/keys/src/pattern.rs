//! Filename grammar patterns.
//!
//! A pattern is a regex with two named groups: `code` (the dotted course
//! code) and `sub` (the sub-key). Patterns are tried in order and the first
//! match wins.

use catalog_core::FilenameKey;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Versioned form: `<digits>.<digits>_<digits>_<name>_<trailing-digits>`.
///
/// The lazy `.+?` keeps a trailing version number out of the sub-key.
pub const VERSIONED_PATTERN: &str = r"^(?P<code>[0-9]+\.[0-9]+)_(?P<sub>[0-9]+_.+?)_[0-9]+$";

/// Plain form: `<digits>.<digits>_<digits>_<name>`.
pub const PLAIN_PATTERN: &str = r"^(?P<code>[0-9]+\.[0-9]+)_(?P<sub>[0-9]+_.+)$";

static DEFAULT_PATTERNS: Lazy<Vec<KeyPattern>> = Lazy::new(|| {
    vec![
        KeyPattern::new("versioned", VERSIONED_PATTERN).expect("Invalid regex"),
        KeyPattern::new("plain", PLAIN_PATTERN).expect("Invalid regex"),
    ]
});

/// Errors building a custom pattern
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// The regex does not compile
    #[error("invalid pattern '{name}': {reason}")]
    InvalidRegex {
        /// Pattern name
        name: String,
        /// Compiler message
        reason: String,
    },

    /// A required capture group is absent
    #[error("pattern '{name}' has no named group '{group}'")]
    MissingGroup {
        /// Pattern name
        name: String,
        /// Missing group name
        group: &'static str,
    },
}

/// One grammar rule for deriving a key from a file stem
#[derive(Debug, Clone)]
pub struct KeyPattern {
    name: String,
    regex: Regex,
}

impl KeyPattern {
    /// Compile a pattern. It must define the `code` and `sub` named groups.
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, PatternError> {
        let name = name.into();
        let regex = Regex::new(pattern).map_err(|e| PatternError::InvalidRegex {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        for group in ["code", "sub"] {
            if !regex.capture_names().flatten().any(|n| n == group) {
                return Err(PatternError::MissingGroup { name, group });
            }
        }
        Ok(KeyPattern { name, regex })
    }

    /// Pattern name, used in logs
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source regex
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Match a file stem (extension already removed)
    pub fn match_stem(&self, stem: &str) -> Option<FilenameKey> {
        let caps = self.regex.captures(stem)?;
        let code = caps.name("code")?.as_str();
        let sub = caps.name("sub")?.as_str();
        Some(FilenameKey::new(code.replace('.', "_"), sub))
    }
}

/// The built-in grammar: versioned form first, then plain.
pub fn default_patterns() -> Vec<KeyPattern> {
    DEFAULT_PATTERNS.clone()
}
