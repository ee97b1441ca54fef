//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! All diagnostics of the policy master builder are `tracing` events. The
//! subscriber is installed once at startup from CLI flags.
//!
//! # Log Levels
//!
//! - `error`: files that failed to load
//! - `warn`: runs that produced no data
//! - `info`: per-file timings and the written master dataset
//! - `debug`: mapping, normalization and aggregation details
//! - `trace`: individual column matches

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Crates whose events follow the configured level.
const POLICY_CRATES: [&str; 6] = [
    "policy_cli",
    "policy_ingest",
    "policy_map",
    "policy_model",
    "policy_normalization",
    "policy_output",
];

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Maximum level emitted by the policy crates.
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` replace the configured filter when set.
    pub use_env_filter: bool,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Optional log file path. When set, logs are appended to the file.
    pub log_file: Option<PathBuf>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level_filter(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the log file path (writes to stderr when None).
    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }
}

/// Initialize the global tracing subscriber with the given configuration.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        init_logging_with_writer(config, SharedFileWriter::new(file));
    } else {
        init_logging_with_writer(config, io::stderr);
    }
    Ok(())
}

/// Initialize logging with a custom writer.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = build_env_filter(config.level_filter, config.use_env_filter);

    // Events carry no timestamps or targets; JSON output also records span closes.
    match config.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_target(false)
                .with_span_events(fmt::format::FmtSpan::CLOSE);

            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .init();
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .without_time()
                .with_writer(writer)
                .with_ansi(config.with_ansi)
                .with_target(false);

            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .init();
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .without_time()
                .with_writer(writer)
                .with_ansi(config.with_ansi)
                .with_target(false);

            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .init();
        }
    }
}

#[derive(Clone)]
struct SharedFileWriter {
    file: Arc<Mutex<std::fs::File>>,
}

impl SharedFileWriter {
    fn new(file: std::fs::File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct SharedFileGuard {
    file: Arc<Mutex<std::fs::File>>,
}

impl Write for SharedFileGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedFileWriter {
    type Writer = SharedFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileGuard {
            file: Arc::clone(&self.file),
        }
    }
}

/// Filter directives: third-party crates stay at `warn`, policy crates
/// follow `level_filter`.
fn filter_directives(level_filter: LevelFilter) -> String {
    let level = level_filter.to_string().to_lowercase();
    let default = LevelFilter::WARN.min(level_filter).to_string().to_lowercase();
    let mut directives = vec![default];
    directives.extend(POLICY_CRATES.iter().map(|name| format!("{name}={level}")));
    directives.join(",")
}

fn build_env_filter(level_filter: LevelFilter, use_env_filter: bool) -> EnvFilter {
    let fallback = || EnvFilter::new(filter_directives(level_filter));
    if use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}
