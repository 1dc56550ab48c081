//! Batch quantization of embedding documents.
//!
//! A segment document maps segment ids to records; each record carries its
//! vector in one field (default `embedding`) either as a JSON number array
//! (raw) or as a codec string (encoded):
//!
//! ```text
//! { "seg-0001": { "text": "...", "embedding": [0.0123, -0.0456, ...] } }
//! { "seg-0001": { "text": "...", "embedding": "ADwAQABC..." } }
//! ```
//!
//! Every operation here treats records independently. A bad record is
//! reported and left untouched; it never aborts the batch. With `parallel`
//! set the records are processed on the rayon pool, and the result is the
//! same as the sequential run.

use crate::report::{BatchReport, ItemFailure, ValidationReport};
use crate::store::json_type_name;
use catalog_codec::{codec_for_dtype, VectorCodec};
use catalog_core::{CatalogError, CatalogResult, ElementDtype, DEFAULT_DIMENSION};
use rayon::prelude::*;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Settings shared by quantize, dequantize and validate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddingOptions {
    /// Element width of encoded vectors
    pub dtype: ElementDtype,
    /// Corpus dimension to enforce
    pub dimension: Option<usize>,
    /// Record field holding the vector
    pub field: String,
    /// Use the rayon pool
    pub parallel: bool,
}

impl Default for EmbeddingOptions {
    fn default() -> Self {
        EmbeddingOptions {
            dtype: ElementDtype::F16,
            dimension: Some(DEFAULT_DIMENSION),
            field: "embedding".to_string(),
            parallel: true,
        }
    }
}

impl EmbeddingOptions {
    fn codec(&self) -> &'static dyn VectorCodec {
        codec_for_dtype(self.dtype)
    }
}

/// What happened to one record
enum Outcome {
    Replace(Value),
    Skip,
    Fail(CatalogError),
}

/// Shape of a record's embedding field
enum Field<'a> {
    Raw(&'a [Value]),
    Encoded(&'a str),
}

fn embedding_field<'a>(record: &'a Value, field: &str) -> CatalogResult<Field<'a>> {
    let obj = record.as_object().ok_or_else(|| {
        CatalogError::invalid_input(format!(
            "record is a {}, not an object",
            json_type_name(record)
        ))
    })?;
    match obj.get(field) {
        Some(Value::Array(items)) => Ok(Field::Raw(items)),
        Some(Value::String(s)) => Ok(Field::Encoded(s)),
        Some(other) => Err(CatalogError::invalid_input(format!(
            "field '{}' is a {}",
            field,
            json_type_name(other)
        ))),
        None => Err(CatalogError::not_found(format!("field '{}'", field))),
    }
}

/// Parse a raw JSON number array into a vector
pub fn parse_raw_vector(items: &[Value]) -> CatalogResult<Vec<f64>> {
    items
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_f64().ok_or_else(|| {
                CatalogError::invalid_input(format!(
                    "element {} is a {}, not a number",
                    i,
                    json_type_name(v)
                ))
            })
        })
        .collect()
}

fn check_dimension(len: usize, expected: Option<usize>) -> CatalogResult<()> {
    match expected {
        Some(expected) if expected != len => Err(CatalogError::DimensionMismatch {
            expected,
            got: len,
        }),
        _ => Ok(()),
    }
}

fn vector_to_json(vector: &[f64]) -> CatalogResult<Value> {
    vector
        .iter()
        .map(|&x| {
            Number::from_f64(x)
                .map(Value::Number)
                .ok_or_else(|| CatalogError::invalid_input(format!("{} is not representable", x)))
        })
        .collect::<CatalogResult<Vec<_>>>()
        .map(Value::Array)
}

fn quantize_record(record: &Value, opts: &EmbeddingOptions) -> Outcome {
    let items = match embedding_field(record, &opts.field) {
        Ok(Field::Raw(items)) => items,
        Ok(Field::Encoded(_)) => return Outcome::Skip,
        Err(e) => return Outcome::Fail(e),
    };
    let encoded = parse_raw_vector(items).and_then(|vector| {
        check_dimension(vector.len(), opts.dimension)?;
        Ok(opts.codec().encode(&vector)?)
    });
    match encoded {
        Ok(s) => Outcome::Replace(Value::String(s)),
        Err(e) => Outcome::Fail(e),
    }
}

fn dequantize_record(record: &Value, opts: &EmbeddingOptions) -> Outcome {
    let encoded = match embedding_field(record, &opts.field) {
        Ok(Field::Encoded(s)) => s,
        Ok(Field::Raw(_)) => return Outcome::Skip,
        Err(e) => return Outcome::Fail(e),
    };
    let decoded = opts
        .codec()
        .decode(encoded, opts.dimension)
        .map_err(CatalogError::from)
        .and_then(|vector| vector_to_json(&vector));
    match decoded {
        Ok(v) => Outcome::Replace(v),
        Err(e) => Outcome::Fail(e),
    }
}

/// Run `f` over every record, in parallel when asked. Output is in document order.
fn map_records<T, F>(doc: &Map<String, Value>, parallel: bool, f: F) -> Vec<(String, T)>
where
    T: Send,
    F: Fn(&Value) -> T + Sync + Send,
{
    let entries: Vec<(&String, &Value)> = doc.iter().collect();
    if parallel {
        entries
            .par_iter()
            .map(|(id, record)| ((*id).clone(), f(*record)))
            .collect()
    } else {
        entries
            .iter()
            .map(|(id, record)| ((*id).clone(), f(*record)))
            .collect()
    }
}

fn apply(
    doc: &mut Map<String, Value>,
    field: &str,
    outcomes: Vec<(String, Outcome)>,
    operation: &str,
) -> BatchReport {
    let mut report = BatchReport::default();
    for (id, outcome) in outcomes {
        match outcome {
            Outcome::Replace(value) => {
                if let Some(Value::Object(record)) = doc.get_mut(&id) {
                    record.insert(field.to_string(), value);
                }
                report.processed += 1;
            }
            Outcome::Skip => report.skipped += 1,
            Outcome::Fail(error) => {
                debug!(id = %id, error = %error, operation, "record left unchanged");
                report.failures.push(ItemFailure::new(id, &error));
            }
        }
    }
    report.sort();
    info!(
        operation,
        processed = report.processed,
        skipped = report.skipped,
        failed = report.failures.len(),
        "batch complete"
    );
    report
}

/// Replace every raw embedding with its encoded string.
///
/// Already-encoded records are counted as skipped. Records that fail
/// (missing field, non-numeric element, wrong dimension, non-finite or
/// out-of-range value) are reported and keep their original value.
pub fn quantize_document(doc: &mut Map<String, Value>, opts: &EmbeddingOptions) -> BatchReport {
    let outcomes = map_records(doc, opts.parallel, |record| quantize_record(record, opts));
    apply(doc, &opts.field, outcomes, "quantize")
}

/// Replace every encoded embedding with a JSON number array.
pub fn dequantize_document(doc: &mut Map<String, Value>, opts: &EmbeddingOptions) -> BatchReport {
    let outcomes = map_records(doc, opts.parallel, |record| dequantize_record(record, opts));
    apply(doc, &opts.field, outcomes, "dequantize")
}

/// Decode or parse one record's embedding, whichever form it is in
pub fn read_embedding(record: &Value, opts: &EmbeddingOptions) -> CatalogResult<Vec<f64>> {
    let vector = match embedding_field(record, &opts.field)? {
        Field::Raw(items) => {
            let vector = parse_raw_vector(items)?;
            if let Some(i) = vector.iter().position(|x| !x.is_finite()) {
                return Err(CatalogError::invalid_input(format!(
                    "element {} is not finite",
                    i
                )));
            }
            vector
        }
        Field::Encoded(s) => opts.codec().decode(s, None)?,
    };
    check_dimension(vector.len(), opts.dimension)?;
    Ok(vector)
}

/// Spot-check every record of a segment document.
///
/// Without a configured dimension, the most common dimension in the
/// document is taken as the corpus dimension (ties go to the smaller one).
pub fn validate_document(doc: &Map<String, Value>, opts: &EmbeddingOptions) -> ValidationReport {
    let unchecked = EmbeddingOptions {
        dimension: None,
        ..opts.clone()
    };
    let results = map_records(doc, opts.parallel, |record| {
        let encoded = matches!(embedding_field(record, &opts.field), Ok(Field::Encoded(_)));
        (encoded, read_embedding(record, &unchecked).map(|v| v.len()))
    });

    let expected = opts.dimension.or_else(|| {
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for (_, (_, result)) in &results {
            if let Ok(len) = result {
                *counts.entry(*len).or_default() += 1;
            }
        }
        counts
            .into_iter()
            .fold(None, |best: Option<(usize, usize)>, (dim, n)| match best {
                Some((_, best_n)) if best_n >= n => best,
                _ => Some((dim, n)),
            })
            .map(|(dim, _)| dim)
    });

    let mut report = ValidationReport {
        total: doc.len(),
        dimension: expected,
        ..ValidationReport::default()
    };
    for (id, (encoded, result)) in results {
        match result {
            Ok(len) => match expected {
                Some(exp) if exp != len => report.wrong_dimension.push(ItemFailure::new(
                    id,
                    &CatalogError::DimensionMismatch {
                        expected: exp,
                        got: len,
                    },
                )),
                _ if encoded => report.encoded += 1,
                _ => report.raw += 1,
            },
            Err(CatalogError::NotFound { .. }) => report.missing.push(id),
            Err(e) => report.malformed.push(ItemFailure::new(id, &e)),
        }
    }
    report.sort();
    info!(
        total = report.total,
        encoded = report.encoded,
        raw = report.raw,
        problems = report.problem_count(),
        "validation complete"
    );
    report
}
