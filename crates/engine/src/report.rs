//! Outcome summaries for batch operations.

use catalog_core::CatalogError;
use serde::Serialize;

/// One record that could not be processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    /// Record id
    pub id: String,
    /// Rendered error
    pub error: String,
}

impl ItemFailure {
    /// Record a failure for `id`
    pub fn new(id: impl Into<String>, error: &CatalogError) -> Self {
        ItemFailure {
            id: id.into(),
            error: error.to_string(),
        }
    }
}

/// Counts from quantize or dequantize
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Records rewritten
    pub processed: usize,
    /// Records already in the target form
    pub skipped: usize,
    /// Records left unchanged because of an error, sorted by id
    pub failures: Vec<ItemFailure>,
}

impl BatchReport {
    /// True when no record failed
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Records seen
    pub fn total(&self) -> usize {
        self.processed + self.skipped + self.failures.len()
    }

    pub(crate) fn sort(&mut self) {
        self.failures.sort_by(|a, b| a.id.cmp(&b.id));
    }
}

/// Findings from `validate_document`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Records in the document
    pub total: usize,
    /// Dimension checked against (configured or inferred)
    pub dimension: Option<usize>,
    /// Valid encoded records
    pub encoded: usize,
    /// Valid raw records
    pub raw: usize,
    /// Ids with no embedding field
    pub missing: Vec<String>,
    /// Records whose embedding can't be read
    pub malformed: Vec<ItemFailure>,
    /// Records whose length differs from `dimension`
    pub wrong_dimension: Vec<ItemFailure>,
}

impl ValidationReport {
    /// Number of records with any problem
    pub fn problem_count(&self) -> usize {
        self.missing.len() + self.malformed.len() + self.wrong_dimension.len()
    }

    /// True when every record holds a readable vector of the right length
    pub fn is_valid(&self) -> bool {
        self.problem_count() == 0
    }

    pub(crate) fn sort(&mut self) {
        self.missing.sort();
        self.malformed.sort_by(|a, b| a.id.cmp(&b.id));
        self.wrong_dimension.sort_by(|a, b| a.id.cmp(&b.id));
    }
}
