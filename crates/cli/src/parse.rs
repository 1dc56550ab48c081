//! ArgMatches → CliAction conversion and config resolution.

use crate::format::OutputMode;
use anyhow::{anyhow, Context, Result};
use catalog_core::ElementDtype;
use catalog_engine::{CatalogConfig, CONFIG_FILE_NAME};
use clap::ArgMatches;
use std::path::{Path, PathBuf};

/// Flags shared by every subcommand
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub config_path: Option<PathBuf>,
    pub dimension: Option<usize>,
    pub dtype: Option<ElementDtype>,
    pub verbosity: u8,
    pub quiet: bool,
    pub mode: OutputMode,
}

/// A fully parsed subcommand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    Quantize {
        input: PathBuf,
        output: Option<PathBuf>,
        pretty: bool,
    },
    Dequantize {
        input: PathBuf,
        output: Option<PathBuf>,
        pretty: bool,
    },
    Validate {
        input: PathBuf,
    },
    Key {
        filenames: Vec<String>,
    },
    Lookup {
        catalog: PathBuf,
        output: Option<PathBuf>,
        pretty: bool,
    },
    InitConfig,
}

pub fn global_options(matches: &ArgMatches) -> Result<GlobalOptions> {
    let dtype = matches
        .get_one::<String>("dtype")
        .map(|s| s.parse::<ElementDtype>().map_err(|e| anyhow!(e)))
        .transpose()?;
    Ok(GlobalOptions {
        config_path: matches.get_one::<PathBuf>("config").cloned(),
        dimension: matches.get_one::<usize>("dimension").copied(),
        dtype,
        verbosity: matches.get_count("verbose"),
        quiet: matches.get_flag("quiet"),
        mode: if matches.get_flag("json") {
            OutputMode::Json
        } else {
            OutputMode::Human
        },
    })
}

fn path(matches: &ArgMatches, id: &str) -> Result<PathBuf> {
    matches
        .get_one::<PathBuf>(id)
        .cloned()
        .ok_or_else(|| anyhow!("missing <{}>", id.to_uppercase()))
}

pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction> {
    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| anyhow!("no subcommand given"))?;
    let output = sub.try_get_one::<PathBuf>("output").ok().flatten().cloned();
    let pretty = sub.try_get_one::<bool>("pretty").ok().flatten().copied().unwrap_or(false);

    let action = match name {
        "quantize" => CliAction::Quantize {
            input: path(sub, "input")?,
            output,
            pretty,
        },
        "dequantize" => CliAction::Dequantize {
            input: path(sub, "input")?,
            output,
            pretty,
        },
        "validate" => CliAction::Validate {
            input: path(sub, "input")?,
        },
        "key" => CliAction::Key {
            filenames: sub
                .get_many::<String>("filenames")
                .map(|names| names.cloned().collect())
                .unwrap_or_default(),
        },
        "lookup" => CliAction::Lookup {
            catalog: path(sub, "catalog")?,
            output,
            pretty,
        },
        "init-config" => CliAction::InitConfig,
        other => return Err(anyhow!("unknown subcommand '{}'", other)),
    };
    Ok(action)
}

/// Path of the config file to read or create
pub fn config_path(globals: &GlobalOptions) -> PathBuf {
    globals
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// Load the config and apply command-line overrides.
///
/// An explicit `--config` must exist; the default `catalog.toml` is optional.
pub fn resolve_config(globals: &GlobalOptions) -> Result<CatalogConfig> {
    let mut config = match &globals.config_path {
        Some(path) => CatalogConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CatalogConfig::load_or_default(Path::new(CONFIG_FILE_NAME))?,
    };
    if let Some(dimension) = globals.dimension {
        config.dimension = dimension;
    }
    if let Some(dtype) = globals.dtype {
        config.dtype = dtype.as_str().to_string();
    }
    config.validate()?;
    Ok(config)
}
