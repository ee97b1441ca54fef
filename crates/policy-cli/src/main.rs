//! Policy master dataset builder CLI.

use clap::{ColorChoice, Parser};
use policy_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_build, run_mapping, run_schema};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let outcome = match &cli.command {
        Command::Build(args) => run_build(args).map(|result| print_summary(&result)),
        Command::Schema => run_schema(),
        Command::Mapping(args) => run_mapping(args),
    };
    let exit_code = match outcome {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let mut config = LogConfig::default()
        .with_level_filter(level_filter)
        .with_format(format)
        .with_log_file(cli.log_file.clone());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
