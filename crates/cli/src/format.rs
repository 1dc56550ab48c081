//! Report → human/json string formatting.
//!
//! Two modes:
//! - **Human** (default): short aligned summaries, one failure per line
//! - **JSON** (`--json`): `serde_json::to_string_pretty` of the report

use catalog_core::FilenameKey;
use catalog_engine::{BatchReport, ItemFailure, LookupReport, ValidationReport};
use serde::Serialize;
use std::fmt::Write;

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

fn push_failures(out: &mut String, label: &str, failures: &[ItemFailure]) {
    for f in failures {
        let _ = write!(out, "\n  {} {}: {}", label, f.id, f.error);
    }
}

/// Format a quantize/dequantize report.
pub fn format_batch_report(operation: &str, report: &BatchReport, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(report),
        OutputMode::Human => {
            let mut out = format!(
                "{}: {} processed, {} skipped, {} failed",
                operation,
                report.processed,
                report.skipped,
                report.failures.len()
            );
            push_failures(&mut out, "failed", &report.failures);
            out
        }
    }
}

/// Format a validation report.
pub fn format_validation_report(report: &ValidationReport, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(report),
        OutputMode::Human => {
            let dimension = report
                .dimension
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());
            let mut out = format!(
                "{} records (dimension {}): {} encoded, {} raw, {} problems",
                report.total,
                dimension,
                report.encoded,
                report.raw,
                report.problem_count()
            );
            for id in &report.missing {
                let _ = write!(out, "\n  missing {}", id);
            }
            push_failures(&mut out, "malformed", &report.malformed);
            push_failures(&mut out, "wrong-dimension", &report.wrong_dimension);
            out
        }
    }
}

#[derive(Serialize)]
struct KeyLine<'a> {
    filename: &'a str,
    key: Option<String>,
}

/// Format extracted keys, one per file name.
///
/// Human mode prints `<filename>\t<code>/<sub>`, or `-` when no key.
pub fn format_keys(keys: &[(String, Option<FilenameKey>)], mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => {
            let lines: Vec<KeyLine<'_>> = keys
                .iter()
                .map(|(filename, key)| KeyLine {
                    filename,
                    key: key.as_ref().map(FilenameKey::lookup_key),
                })
                .collect();
            to_json(&lines)
        }
        OutputMode::Human => keys
            .iter()
            .map(|(filename, key)| match key {
                Some(key) => format!("{}\t{}", filename, key),
                None => format!("{}\t-", filename),
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Format the summary of a lookup build.
pub fn format_lookup_summary(report: &LookupReport, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(report),
        OutputMode::Human => {
            let lookup = &report.lookup;
            let mut out = format!(
                "lookup: {} keys, {} unmatched, {} duplicates, {} skipped entries",
                lookup.len(),
                lookup.unmatched.len(),
                lookup.duplicates.len(),
                report.skipped_entries.len()
            );
            for d in &lookup.duplicates {
                let _ = write!(
                    out,
                    "\n  duplicate {}: kept {}, dropped {} ({})",
                    d.key, d.kept_id, d.dropped_id, d.name
                );
            }
            out
        }
    }
}

/// Format a top-level error.
pub fn format_error(err: &anyhow::Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(&serde_json::json!({ "error": format!("{:#}", err) })),
        OutputMode::Human => format!("(error) {:#}", err),
    }
}
