//! CLI argument definitions for the policy master builder.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use policy_model::CLIMATE_MAPPING;
use policy_output::DEFAULT_OUTPUT_FILE;

#[derive(Parser)]
#[command(
    name = "policy-master",
    version,
    about = "Build a master policy inventory dataset from country spreadsheets",
    long_about = "Combine heterogeneous policy inventory spreadsheets into one master dataset.\n\n\
                  Each input file is mapped onto a fixed 18-column schema, the funding\n\
                  indicator is derived from budget text, and empty rows are dropped."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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
    /// Load, standardize and combine the input files into the master dataset.
    Build(BuildArgs),

    /// Print the canonical column order of the master dataset.
    Schema,

    /// Print the rules of a built-in column mapping.
    Mapping(MappingArgs),
}

#[derive(Parser)]
pub struct BuildArgs {
    /// Directory that relative input paths are resolved against.
    #[arg(long = "input-dir", value_name = "DIR", default_value = ".")]
    pub input_dir: PathBuf,

    /// JSON manifest listing input files and mappings (default: built-in inventory list).
    #[arg(long = "manifest", value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Path of the master dataset; `.xlsx` writes a workbook, `.csv` a CSV file.
    #[arg(long = "output", value_name = "FILE", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Write a JSON run report to this path.
    #[arg(long = "report", value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Process every file but do not write the master dataset.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct MappingArgs {
    /// Name of the built-in mapping.
    #[arg(long = "name", value_name = "NAME", default_value = CLIMATE_MAPPING)]
    pub name: String,
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
