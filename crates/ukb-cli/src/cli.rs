//! CLI argument definitions for the schema converter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ukb2linst",
    version,
    about = "Convert the UK Biobank schema dictionary to LORIS instruments",
    long_about = "Convert the UK Biobank showcase schema dictionary into LORIS\n\
                  instrument definitions (LINST): one instrument per category\n\
                  that owns fields, rendered in the {@}-delimited grammar."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a schema directory into LINST instrument files.
    Convert(ConvertArgs),

    /// Verify that a schema directory contains every indexed file.
    Check(CheckArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Path to the directory of pre-fetched schema files.
    #[arg(value_name = "SCHEMA_DIR")]
    pub schema_dir: PathBuf,

    /// Output directory for .linst files (default: <SCHEMA_DIR>/linst).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Only convert the given category ids (repeatable).
    #[arg(long = "category", value_name = "ID")]
    pub categories: Vec<String>,

    /// Render and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Path to the directory of pre-fetched schema files.
    #[arg(value_name = "SCHEMA_DIR")]
    pub schema_dir: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
