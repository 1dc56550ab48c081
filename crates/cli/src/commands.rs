//! Clap command tree definition.

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("catalog")
        .about("Embedding quantization and filename join keys for course catalogs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Config file (default: catalog.toml if present)")
                .global(true),
        )
        .arg(
            Arg::new("dimension")
                .long("dimension")
                .short('d')
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Corpus dimension, overrides config (0 = don't check)")
                .global(true),
        )
        .arg(
            Arg::new("dtype")
                .long("dtype")
                .value_name("DTYPE")
                .value_parser(["f16", "f32"])
                .help("Element width of encoded vectors, overrides config")
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("More log output (repeatable)")
                .action(ArgAction::Count)
                .conflicts_with("quiet")
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only log errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(build_quantize())
        .subcommand(build_dequantize())
        .subcommand(build_validate())
        .subcommand(build_key())
        .subcommand(build_lookup())
        .subcommand(build_init_config())
}

fn input_arg(help: &'static str) -> Arg {
    Arg::new("input")
        .required(true)
        .value_name("INPUT")
        .value_parser(value_parser!(PathBuf))
        .help(help)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .value_name("OUTPUT")
        .value_parser(value_parser!(PathBuf))
        .help("Write here instead of replacing the input")
}

fn pretty_arg() -> Arg {
    Arg::new("pretty")
        .long("pretty")
        .help("Indent written JSON")
        .action(ArgAction::SetTrue)
}

fn build_quantize() -> Command {
    Command::new("quantize")
        .about("Encode raw embeddings in a segment document")
        .arg(input_arg("Segment document (JSON object of records)"))
        .arg(output_arg())
        .arg(pretty_arg())
}

fn build_dequantize() -> Command {
    Command::new("dequantize")
        .about("Decode encoded embeddings back to number arrays")
        .arg(input_arg("Segment document (JSON object of records)"))
        .arg(output_arg())
        .arg(pretty_arg())
}

fn build_validate() -> Command {
    Command::new("validate")
        .about("Check every record holds a readable embedding of the corpus dimension")
        .arg(input_arg("Segment document (JSON object of records)"))
}

fn build_key() -> Command {
    Command::new("key")
        .about("Print the lookup key derived from each file name")
        .arg(
            Arg::new("filenames")
                .required(true)
                .num_args(1..)
                .value_name("FILENAME")
                .help("Media file names"),
        )
}

fn build_lookup() -> Command {
    Command::new("lookup")
        .about("Build a lookup key → media id table from a media catalog")
        .arg(
            Arg::new("catalog")
                .required(true)
                .value_name("CATALOG")
                .value_parser(value_parser!(PathBuf))
                .help("Media catalog (JSON array of entries)"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("OUTPUT")
                .value_parser(value_parser!(PathBuf))
                .help("Write the table here instead of stdout"),
        )
        .arg(pretty_arg())
}

fn build_init_config() -> Command {
    Command::new("init-config").about("Write a default catalog.toml if none exists")
}
