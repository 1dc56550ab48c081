//! File-backed JSON record store.
//!
//! Catalog documents are flat JSON objects mapping a record id to a record.
//! The store loads one document, applies updates in memory, and replaces the
//! file atomically on save (temp + fsync + rename), so a crash mid-write
//! never leaves a truncated catalog behind.

use catalog_core::{CatalogError, CatalogResult};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Output layout for written JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Single line, smallest output (default)
    #[default]
    Compact,
    /// Indented, for files people read
    Pretty,
}

/// Read and parse a JSON file.
pub fn load_json(path: &Path) -> CatalogResult<Value> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CatalogError::not_found(path.display().to_string()),
        _ => CatalogError::Io(e),
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        CatalogError::serialization(format!("Failed to parse '{}': {}", path.display(), e))
    })
}

/// Write JSON to `path` atomically (temp + fsync + rename).
///
/// Object keys are written in document order.
pub fn write_json_atomic(path: &Path, value: &Value, format: JsonFormat) -> CatalogResult<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    let payload = match format {
        JsonFormat::Compact => serde_json::to_vec(value),
        JsonFormat::Pretty => serde_json::to_vec_pretty(value),
    }
    .map_err(|e| CatalogError::serialization(format!("serialize error: {}", e)))?;

    // Temp file lives beside the target so the rename stays on one
    // filesystem; it is removed on drop if any step fails.
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&payload)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| CatalogError::Io(e.error))?;
    debug!(path = %path.display(), bytes = payload.len(), "wrote json");
    Ok(())
}

/// One JSON object document held in memory
#[derive(Debug)]
pub struct DocumentStore {
    path: PathBuf,
    records: Map<String, Value>,
    format: JsonFormat,
    dirty: bool,
}

impl DocumentStore {
    /// Load an existing document. The top level must be a JSON object.
    pub fn open(path: impl Into<PathBuf>) -> CatalogResult<Self> {
        let path = path.into();
        let records = match load_json(&path)? {
            Value::Object(map) => map,
            other => {
                return Err(CatalogError::invalid_input(format!(
                    "'{}' is not a JSON object (found {})",
                    path.display(),
                    json_type_name(&other)
                )))
            }
        };
        debug!(path = %path.display(), records = records.len(), "opened document");
        Ok(DocumentStore {
            path,
            records,
            format: JsonFormat::default(),
            dirty: false,
        })
    }

    /// Load `path`, or start an empty document if it does not exist yet.
    pub fn open_or_create(path: impl Into<PathBuf>) -> CatalogResult<Self> {
        let path = path.into();
        if path.exists() {
            return Self::open(path);
        }
        Ok(DocumentStore {
            path,
            records: Map::new(),
            format: JsonFormat::default(),
            dirty: true,
        })
    }

    /// Set the layout used by `save`
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the document has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when there are unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Get a record by id
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.records.get(id)
    }

    /// All records
    pub fn records(&self) -> &Map<String, Value> {
        &self.records
    }

    /// Mutable access to all records; marks the store dirty
    pub fn records_mut(&mut self) -> &mut Map<String, Value> {
        self.dirty = true;
        &mut self.records
    }

    /// Insert or replace a record, returning the previous one
    pub fn insert(&mut self, id: impl Into<String>, record: Value) -> Option<Value> {
        self.dirty = true;
        self.records.insert(id.into(), record)
    }

    /// Remove a record
    pub fn remove(&mut self, id: &str) -> Option<Value> {
        let removed = self.records.remove(id);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    /// Apply `f` to an existing record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has this id.
    pub fn update<R>(&mut self, id: &str, f: impl FnOnce(&mut Value) -> R) -> CatalogResult<R> {
        let record = self
            .records
            .get_mut(id)
            .ok_or_else(|| CatalogError::not_found(format!("record '{}'", id)))?;
        self.dirty = true;
        Ok(f(record))
    }

    /// Write the document back to its file
    pub fn save(&mut self) -> CatalogResult<()> {
        let path = self.path.clone();
        self.save_as(&path)
    }

    /// Write the document to another file. The store keeps its own path.
    pub fn save_as(&mut self, path: &Path) -> CatalogResult<()> {
        let value = Value::Object(std::mem::take(&mut self.records));
        let result = write_json_atomic(path, &value, self.format);
        if let Value::Object(map) = value {
            self.records = map;
        }
        result?;
        if path == self.path {
            self.dirty = false;
        }
        Ok(())
    }

    /// Consume the store, returning the records
    pub fn into_records(self) -> Map<String, Value> {
        self.records
    }
}

/// Name of a JSON value's type, for messages
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
