//! Policy master pipeline.
//!
//! Each input file goes through four stages:
//! 1. **Load**: read the first (or named) worksheet, or the CSV file
//! 2. **Map**: standardize onto the canonical columns
//! 3. **Normalize**: derive the funding indicator, drop empty rows
//! 4. **Collect**: keep the table for aggregation
//!
//! Failures are isolated per file: a file that cannot be processed is
//! logged and recorded in its [`FileOutcome`], and the run continues.
//! The collected tables are then aggregated and written once.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{debug, error, info, info_span, warn};

use policy_ingest::load_source_table;
use policy_map::{StandardizedTable, standardize};
use policy_model::{InputFile, Manifest};
use policy_normalization::{NormalizationSummary, normalize_table};
use policy_output::{OutputFormat, aggregate, write_master};

use crate::types::{FileOutcome, FileStatus, RunResult};

/// A file that made it through load, map and normalize.
#[derive(Debug)]
pub struct ProcessedFile {
    pub table: StandardizedTable,
    pub source_rows: usize,
    pub normalization: NormalizationSummary,
}

/// Loads, standardizes and normalizes one input file.
pub fn process_file(input: &InputFile) -> Result<ProcessedFile> {
    let source = load_source_table(&input.path, input.sheet.as_deref())
        .with_context(|| format!("load {}", input.path.display()))?;
    let source_rows = source.height();

    let mut table = standardize(&source.data, &input.mapping)
        .with_context(|| format!("map {}", input.path.display()))?;
    let normalization = normalize_table(&mut table, &source.data, &input.mapping)
        .with_context(|| format!("normalize {}", input.path.display()))?;

    Ok(ProcessedFile {
        table,
        source_rows,
        normalization,
    })
}

/// Per-file progress notifications for the user-facing console.
///
/// Both methods default to doing nothing.
pub trait Progress {
    fn started(&mut self, _input: &InputFile) {}
    fn finished(&mut self, _outcome: &FileOutcome) {}
}

/// Progress sink that reports nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {}

fn outcome_for(
    input: &InputFile,
    status: FileStatus,
    table: Option<&StandardizedTable>,
) -> FileOutcome {
    let unmatched_columns = table
        .map(|t| {
            t.unmatched_columns()
                .into_iter()
                .map(|c| c.name().to_string())
                .collect()
        })
        .unwrap_or_default();
    FileOutcome {
        path: input.path.clone(),
        mapping: input.mapping.name().to_string(),
        status,
        unmatched_columns,
    }
}

/// Processes every manifest entry in order.
///
/// Returns the standardized frames of the successful files, in manifest
/// order, and one outcome per entry. `progress` sees every entry before and
/// after it is processed.
pub fn process_manifest(
    manifest: &Manifest,
    progress: &mut dyn Progress,
) -> (Vec<DataFrame>, Vec<FileOutcome>) {
    let mut frames = Vec::with_capacity(manifest.len());
    let mut outcomes = Vec::with_capacity(manifest.len());

    for input in &manifest.files {
        let span = info_span!("file", path = %input.path.display());
        let _guard = span.enter();
        let start = Instant::now();
        info!(mapping = input.mapping.name(), "processing file");
        progress.started(input);

        match process_file(input) {
            Ok(processed) => {
                let rows = processed.table.height();
                info!(
                    rows,
                    source_rows = processed.source_rows,
                    dropped = processed.normalization.dropped_rows,
                    duration_ms = start.elapsed().as_millis(),
                    "file standardized"
                );
                let status = FileStatus::Processed {
                    source_rows: processed.source_rows,
                    rows,
                    dropped_rows: processed.normalization.dropped_rows,
                };
                let outcome = outcome_for(input, status, Some(&processed.table));
                progress.finished(&outcome);
                outcomes.push(outcome);
                frames.push(processed.table.data);
            }
            Err(err) => {
                let message = format!("{err:#}");
                error!(error = %message, "failed to load file");
                let outcome = outcome_for(input, FileStatus::Failed { error: message }, None);
                progress.finished(&outcome);
                outcomes.push(outcome);
            }
        }
    }

    (frames, outcomes)
}

/// Runs the whole pipeline without progress reporting.
pub fn run_pipeline(manifest: &Manifest, output: Option<&Path>) -> Result<RunResult> {
    run_pipeline_with_progress(manifest, output, &mut NoProgress)
}

/// Runs the whole pipeline.
///
/// With `output = None` nothing is written. The output format follows the
/// extension of `output` and is checked before any file is read. When no
/// file is processed the run still succeeds, but no output is produced.
pub fn run_pipeline_with_progress(
    manifest: &Manifest,
    output: Option<&Path>,
    progress: &mut dyn Progress,
) -> Result<RunResult> {
    if let Some(path) = output {
        OutputFormat::from_path(path).context("choose master dataset format")?;
    }
    let (frames, files) = process_manifest(manifest, progress);

    let Some(mut master) = aggregate(frames).context("aggregate standardized tables")? else {
        warn!(files = files.len(), "no data was processed");
        return Ok(RunResult {
            output: None,
            total_rows: 0,
            files,
        });
    };
    let total_rows = master.height();
    debug!(rows = total_rows, "master dataset assembled");

    let written = match output {
        Some(path) => {
            write_master(path, &mut master)
                .with_context(|| format!("write {}", path.display()))?;
            Some(path.to_path_buf())
        }
        None => {
            info!(rows = total_rows, "dry run; master dataset not written");
            None
        }
    };

    Ok(RunResult {
        output: written,
        total_rows,
        files,
    })
}

/// Writes the run result as pretty JSON.
pub fn write_run_report(path: &Path, result: &RunResult) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(result).context("serialize run report")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "run report written");
    Ok(())
}
