//! Per-file outcomes and the run result.

use std::path::PathBuf;

use serde::Serialize;

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Processed {
        source_rows: usize,
        rows: usize,
        dropped_rows: usize,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub mapping: String,
    #[serde(flatten)]
    pub status: FileStatus,
    /// Canonical columns whose rule found no source column.
    pub unmatched_columns: Vec<String>,
}

impl FileOutcome {
    pub fn is_processed(&self) -> bool {
        matches!(self.status, FileStatus::Processed { .. })
    }
}

/// Result of a `build` run.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    /// Written master dataset; `None` for dry runs and runs without data.
    pub output: Option<PathBuf>,
    pub total_rows: usize,
    pub files: Vec<FileOutcome>,
}

impl RunResult {
    pub fn processed_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.is_processed())
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.files.len() - self.processed_count()
    }

    /// True when at least one file produced a standardized table.
    pub fn has_data(&self) -> bool {
        self.processed_count() > 0
    }
}
