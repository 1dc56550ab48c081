//! Catalog CLI: quantize embedding documents and derive filename join keys.
//!
//! Shell-style: `catalog [flags] COMMAND`, one command per run. Reports go to
//! stdout, logs to stderr.

mod commands;
mod format;
mod parse;

use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use catalog_engine::{
    build_lookup, dequantize_document, load_json, lookup_table_json, quantize_document,
    validate_document, write_json_atomic, BatchReport, CatalogConfig, DocumentStore,
    EmbeddingOptions, JsonFormat,
};
use catalog_keys::extract_key;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::{
    format_batch_report, format_error, format_keys, format_lookup_summary,
    format_validation_report, OutputMode,
};
use parse::{config_path, global_options, matches_to_action, resolve_config, CliAction};

fn main() {
    let matches = build_cli().get_matches();

    let globals = match global_options(&matches) {
        Ok(globals) => globals,
        Err(e) => {
            eprintln!("{}", format_error(&e, OutputMode::Human));
            process::exit(2);
        }
    };
    init_tracing(globals.verbosity, globals.quiet);

    let result = matches_to_action(&matches).and_then(|action| match action {
        CliAction::InitConfig => init_config(&config_path(&globals)),
        CliAction::Key { filenames } => {
            run_key(filenames, globals.mode);
            Ok(0)
        }
        action => {
            let config = resolve_config(&globals)?;
            run_with_config(action, &config, globals.mode)
        }
    });

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{}", format_error(&e, globals.mode));
            process::exit(1);
        }
    }
}

/// Log level from `-v` count; `RUST_LOG` wins when set.
fn init_tracing(verbosity: u8, quiet: bool) {
    let level = match (quiet, verbosity) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn json_format(pretty: bool) -> JsonFormat {
    if pretty {
        JsonFormat::Pretty
    } else {
        JsonFormat::Compact
    }
}

fn run_with_config(action: CliAction, config: &CatalogConfig, mode: OutputMode) -> Result<i32> {
    let opts = config.embedding_options()?;
    match action {
        CliAction::Quantize {
            input,
            output,
            pretty,
        } => run_batch("quantize", &input, output.as_deref(), pretty, mode, |doc| {
            quantize_document(doc, &opts)
        }),
        CliAction::Dequantize {
            input,
            output,
            pretty,
        } => run_batch("dequantize", &input, output.as_deref(), pretty, mode, |doc| {
            dequantize_document(doc, &opts)
        }),
        CliAction::Validate { input } => run_validate(&input, &opts, mode),
        CliAction::Lookup {
            catalog,
            output,
            pretty,
        } => run_lookup(&catalog, output.as_deref(), pretty, config, mode),
        CliAction::Key { .. } | CliAction::InitConfig => Ok(0),
    }
}

/// Load, transform, save. Exit code 1 when any record failed; the
/// document is written either way.
fn run_batch<F>(
    operation: &str,
    input: &Path,
    output: Option<&Path>,
    pretty: bool,
    mode: OutputMode,
    transform: F,
) -> Result<i32>
where
    F: FnOnce(&mut serde_json::Map<String, serde_json::Value>) -> BatchReport,
{
    let mut store = DocumentStore::open(input)
        .with_context(|| format!("opening {}", input.display()))?
        .with_format(json_format(pretty));
    let report = transform(store.records_mut());

    let saved = match output {
        Some(path) => store.save_as(path),
        None => store.save(),
    };
    saved.with_context(|| format!("writing {}", output.unwrap_or(input).display()))?;

    println!("{}", format_batch_report(operation, &report, mode));
    if !report.is_clean() {
        warn!(failed = report.failures.len(), "{} left some records unchanged", operation);
        return Ok(1);
    }
    Ok(0)
}

fn run_validate(input: &Path, opts: &EmbeddingOptions, mode: OutputMode) -> Result<i32> {
    let store =
        DocumentStore::open(input).with_context(|| format!("opening {}", input.display()))?;
    let report = validate_document(store.records(), opts);
    println!("{}", format_validation_report(&report, mode));
    Ok(if report.is_valid() { 0 } else { 1 })
}

fn run_key(filenames: Vec<String>, mode: OutputMode) {
    let keys: Vec<_> = filenames
        .into_iter()
        .map(|name| {
            let key = extract_key(&name);
            (name, key)
        })
        .collect();
    println!("{}", format_keys(&keys, mode));
}

fn run_lookup(
    catalog: &Path,
    output: Option<&Path>,
    pretty: bool,
    config: &CatalogConfig,
    mode: OutputMode,
) -> Result<i32> {
    let value = load_json(catalog).with_context(|| format!("reading {}", catalog.display()))?;
    let report = build_lookup(&value, &config.lookup_options())?;
    let table = lookup_table_json(&report);

    match output {
        Some(path) => {
            write_json_atomic(path, &table, json_format(pretty))
                .with_context(|| format!("writing {}", path.display()))?;
            println!("{}", format_lookup_summary(&report, mode));
        }
        None => {
            let text = if pretty {
                serde_json::to_string_pretty(&table)
            } else {
                serde_json::to_string(&table)
            }?;
            println!("{}", text);
            eprintln!("{}", format_lookup_summary(&report, OutputMode::Human));
        }
    }
    Ok(0)
}

fn init_config(path: &Path) -> Result<i32> {
    if CatalogConfig::write_default_if_missing(path)
        .with_context(|| format!("writing {}", path.display()))?
    {
        info!(path = %path.display(), "created config");
        println!("Created {}", path.display());
    } else {
        println!("{} already exists", path.display());
    }
    Ok(0)
}
