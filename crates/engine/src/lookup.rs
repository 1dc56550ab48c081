//! Lookup table building from a media catalog document.
//!
//! The media catalog is a JSON array of entries, each with a file name and a
//! media id (e.g. a drive file id):
//!
//! ```text
//! [ { "name": "100.01_18_BlueprintEditor_55.mp4", "id": "1AbC..." }, ... ]
//! ```
//!
//! The result maps `"<course_code>/<sub_key>"` to the media id.

use crate::store::json_type_name;
use catalog_core::{CatalogError, CatalogResult};
use catalog_keys::{KeyExtractor, LookupBuild, MediaLookup};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

/// Entry field names in the media catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOptions {
    /// Field holding the file name
    pub name_field: String,
    /// Field holding the media id
    pub id_field: String,
}

impl Default for LookupOptions {
    fn default() -> Self {
        LookupOptions {
            name_field: "name".to_string(),
            id_field: "id".to_string(),
        }
    }
}

/// Lookup table plus the catalog entries that could not be read
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LookupReport {
    /// Keys, unmatched names and duplicates
    #[serde(flatten)]
    pub lookup: LookupBuild,
    /// Array positions of entries lacking a usable name or id
    pub skipped_entries: Vec<usize>,
}

fn entry_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Build a lookup table with the built-in filename grammar.
pub fn build_lookup(catalog: &Value, opts: &LookupOptions) -> CatalogResult<LookupReport> {
    build_lookup_with(catalog, opts, &KeyExtractor::default())
}

/// Build a lookup table with a custom extractor.
///
/// # Errors
///
/// Returns `InvalidInput` if the catalog is not a JSON array. Individual
/// malformed entries are reported in `skipped_entries` instead.
pub fn build_lookup_with(
    catalog: &Value,
    opts: &LookupOptions,
    extractor: &KeyExtractor,
) -> CatalogResult<LookupReport> {
    let entries = catalog.as_array().ok_or_else(|| {
        CatalogError::invalid_input(format!(
            "media catalog must be an array, found {}",
            json_type_name(catalog)
        ))
    })?;

    let mut skipped_entries = Vec::new();
    let mut pairs = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let name = entry.get(&opts.name_field).and_then(Value::as_str);
        let id = entry.get(&opts.id_field).and_then(entry_id);
        match (name, id) {
            (Some(name), Some(id)) => pairs.push((name, id)),
            _ => {
                debug!(index, "catalog entry lacks name or id");
                skipped_entries.push(index);
            }
        }
    }

    let lookup = MediaLookup::new(extractor.clone()).build(pairs);
    info!(
        keys = lookup.len(),
        unmatched = lookup.unmatched.len(),
        duplicates = lookup.duplicates.len(),
        skipped = skipped_entries.len(),
        "lookup built"
    );
    Ok(LookupReport {
        lookup,
        skipped_entries,
    })
}

/// Render the table as a JSON object.
pub fn lookup_table_json(report: &LookupReport) -> Value {
    Value::Object(
        report
            .lookup
            .table
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}
