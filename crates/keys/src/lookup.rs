//! Media catalog lookup table.
//!
//! Joins a media catalog (file name → media id, e.g. a drive file id) to the
//! course catalog by deriving a `"<course_code>/<sub_key>"` key from each
//! file name.

use crate::extractor::KeyExtractor;
use catalog_core::FilenameKey;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// A second media entry that produced an already-used key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateKey {
    /// Lookup key both entries map to
    pub key: String,
    /// File name of the dropped entry
    pub name: String,
    /// Id kept in the table (first seen)
    pub kept_id: String,
    /// Id of the dropped entry
    pub dropped_id: String,
}

/// Result of building a lookup table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LookupBuild {
    /// Lookup key → media id, in key order
    pub table: BTreeMap<String, String>,
    /// File names that matched no pattern, in input order
    pub unmatched: Vec<String>,
    /// Entries dropped because their key was already taken
    pub duplicates: Vec<DuplicateKey>,
}

impl LookupBuild {
    /// Media id for a key
    pub fn get(&self, key: &FilenameKey) -> Option<&str> {
        self.table.get(&key.lookup_key()).map(String::as_str)
    }

    /// Number of keys in the table
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// True when no entry matched
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Builds lookup tables from `(file name, media id)` pairs
#[derive(Debug, Clone, Default)]
pub struct MediaLookup {
    extractor: KeyExtractor,
}

impl MediaLookup {
    /// Use a custom extractor
    pub fn new(extractor: KeyExtractor) -> Self {
        MediaLookup { extractor }
    }

    /// Build the table. The first entry for a key wins.
    pub fn build<I, N, V>(&self, entries: I) -> LookupBuild
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: Into<String>,
    {
        let mut build = LookupBuild::default();

        for (name, id) in entries {
            let name = name.as_ref();
            let id = id.into();
            let Some(key) = self.extractor.extract(name) else {
                debug!(name, "no key pattern matched");
                build.unmatched.push(name.to_string());
                continue;
            };

            let key = key.lookup_key();
            match build.table.get(&key) {
                Some(kept) => {
                    warn!(key = %key, name, "duplicate lookup key, keeping first entry");
                    build.duplicates.push(DuplicateKey {
                        key,
                        name: name.to_string(),
                        kept_id: kept.clone(),
                        dropped_id: id,
                    });
                }
                None => {
                    build.table.insert(key, id);
                }
            }
        }

        build
    }
}
