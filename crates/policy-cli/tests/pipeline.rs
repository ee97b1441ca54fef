//! End-to-end tests for the pipeline driver.

use std::fs;
use std::path::Path;

use polars::prelude::AnyValue;

use policy_cli::pipeline::{
    Progress, process_file, process_manifest, run_pipeline, run_pipeline_with_progress,
    write_run_report,
};
use policy_cli::types::{FileOutcome, FileStatus};
use policy_ingest::{any_to_text as text, load_source_table};
use policy_model::{CanonicalColumn, InputFile, Manifest, climate_mapping};
use policy_output::{DEFAULT_OUTPUT_FILE, MASTER_SHEET_NAME};

const BUDGET_HEADER: &str =
    "Budget Allocation (if any) Indicate if there is any budget attached and its size or source.";

fn write_inventory(dir: &Path) {
    fs::write(dir.join("a.csv"), "Policy,Year of adoption\nWater Act,\n,\n").unwrap();
    fs::write(
        dir.join("b.csv"),
        format!("Policy,Country,{BUDGET_HEADER}\nForest Code,Nigeria,No dedicated budget\n"),
    )
    .unwrap();
    fs::write(
        dir.join("c.csv"),
        format!("Policy,{BUDGET_HEADER}\nEnergy Plan,USD 2M allocated\n"),
    )
    .unwrap();
}

fn manifest(dir: &Path, files: &[&str]) -> Manifest {
    let entries: Vec<String> = files
        .iter()
        .map(|name| format!(r#"{{"path": "{name}"}}"#))
        .collect();
    let json = format!(r#"{{"files": [{}]}}"#, entries.join(", "));
    Manifest::parse(&json, Path::new("manifest.json"), dir).unwrap()
}

#[test]
fn three_files_produce_one_master_dataset() {
    let dir = tempfile::tempdir().unwrap();
    write_inventory(dir.path());
    let output = dir.path().join("out").join("MASTER_POLICY_DATASET.csv");

    let result = run_pipeline(&manifest(dir.path(), &["a.csv", "b.csv", "c.csv"]), Some(&output))
        .unwrap();

    assert_eq!(result.total_rows, 3);
    assert_eq!(result.output.as_deref(), Some(output.as_path()));
    assert_eq!(
        result.files[0].status,
        FileStatus::Processed {
            source_rows: 2,
            rows: 1,
            dropped_rows: 1,
        }
    );

    let master = load_source_table(&output, None).unwrap().data;
    let ids = master.column("Sl No").unwrap();
    let titles = master.column("Title").unwrap();
    let countries = master.column("Country").unwrap();
    let funding = master.column(CanonicalColumn::FUNDING.name()).unwrap();
    for idx in 0..3 {
        assert_eq!(ids.get(idx).unwrap(), AnyValue::Int64(idx as i64 + 1));
    }
    assert_eq!(text(titles.get(0).unwrap()).as_deref(), Some("Water Act"));
    assert_eq!(text(countries.get(0).unwrap()), None);
    assert_eq!(text(countries.get(1).unwrap()).as_deref(), Some("Nigeria"));
    assert_eq!(text(funding.get(0).unwrap()), None);
    assert_eq!(text(funding.get(1).unwrap()).as_deref(), Some("No"));
    assert_eq!(text(funding.get(2).unwrap()).as_deref(), Some("Yes"));
}

#[test]
fn default_output_is_a_single_sheet_workbook() {
    let dir = tempfile::tempdir().unwrap();
    write_inventory(dir.path());
    let output = dir.path().join(DEFAULT_OUTPUT_FILE);

    let result = run_pipeline(&manifest(dir.path(), &["a.csv", "b.csv", "c.csv"]), Some(&output))
        .unwrap();
    assert_eq!(result.total_rows, 3);

    let master = load_source_table(&output, None).unwrap();
    assert_eq!(master.sheet.as_deref(), Some(MASTER_SHEET_NAME));
    assert_eq!(master.data.width(), CanonicalColumn::ALL.len());
    let ids = master.data.column("Sl No").unwrap();
    assert_eq!(ids.get(2).unwrap(), AnyValue::Int64(3));
    let countries = master.data.column("Country").unwrap();
    assert_eq!(text(countries.get(0).unwrap()), None);
    assert_eq!(text(countries.get(1).unwrap()).as_deref(), Some("Nigeria"));
    let funding = master.data.column(CanonicalColumn::FUNDING.name()).unwrap();
    assert_eq!(text(funding.get(0).unwrap()), None);
    assert_eq!(text(funding.get(1).unwrap()).as_deref(), Some("No"));
    assert_eq!(text(funding.get(2).unwrap()).as_deref(), Some("Yes"));
}

#[test]
fn unsupported_output_extension_fails_before_processing() {
    let dir = tempfile::tempdir().unwrap();
    write_inventory(dir.path());
    let output = dir.path().join("master.txt");
    let mut progress = RecordingProgress::default();

    let err = run_pipeline_with_progress(
        &manifest(dir.path(), &["a.csv"]),
        Some(&output),
        &mut progress,
    )
    .unwrap_err();

    assert!(format!("{err:#}").contains(".txt"), "{err:#}");
    assert!(progress.events.is_empty());
    assert!(!output.exists());
}

#[derive(Default)]
struct RecordingProgress {
    events: Vec<String>,
}

impl Progress for RecordingProgress {
    fn started(&mut self, input: &InputFile) {
        self.events.push(format!("start {}", file_name(&input.path)));
    }

    fn finished(&mut self, outcome: &FileOutcome) {
        let label = if outcome.is_processed() { "ok" } else { "failed" };
        self.events.push(format!("{label} {}", file_name(&outcome.path)));
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

#[test]
fn progress_sees_every_file_in_order() {
    let dir = tempfile::tempdir().unwrap();
    write_inventory(dir.path());
    let mut progress = RecordingProgress::default();

    let (frames, outcomes) = process_manifest(
        &manifest(dir.path(), &["a.csv", "missing.csv", "b.csv"]),
        &mut progress,
    );

    assert_eq!(frames.len(), 2);
    assert_eq!(outcomes.len(), 3);
    assert_eq!(
        progress.events,
        vec![
            "start a.csv",
            "ok a.csv",
            "start missing.csv",
            "failed missing.csv",
            "start b.csv",
            "ok b.csv",
        ]
    );
}

#[test]
fn failed_file_is_skipped_and_reported() {
    let dir = tempfile::tempdir().unwrap();
    write_inventory(dir.path());
    let output = dir.path().join("master.csv");

    let result = run_pipeline(
        &manifest(dir.path(), &["a.csv", "missing.xlsx", "b.csv"]),
        Some(&output),
    )
    .unwrap();

    assert_eq!(result.total_rows, 2);
    assert_eq!(result.processed_count(), 2);
    assert_eq!(result.failed_count(), 1);
    match &result.files[1].status {
        FileStatus::Failed { error } => assert!(error.contains("missing.xlsx"), "{error}"),
        other => panic!("expected failure, got {other:?}"),
    }
    let master = load_source_table(&output, None).unwrap().data;
    assert_eq!(master.height(), 2);
    let ids = master.column("Sl No").unwrap();
    assert_eq!(ids.get(1).unwrap(), AnyValue::Int64(2));
}

#[test]
fn no_output_when_nothing_was_processed() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("master.csv");

    let result = run_pipeline(
        &manifest(dir.path(), &["missing-1.xlsx", "missing-2.csv"]),
        Some(&output),
    )
    .unwrap();

    assert!(!result.has_data());
    assert_eq!(result.output, None);
    assert_eq!(result.total_rows, 0);
    assert!(!output.exists());
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_inventory(dir.path());

    let result = run_pipeline(&manifest(dir.path(), &["a.csv", "b.csv"]), None).unwrap();

    assert_eq!(result.total_rows, 2);
    assert_eq!(result.output, None);
    assert!(result.has_data());
}

#[test]
fn process_file_reports_unmatched_columns() {
    let dir = tempfile::tempdir().unwrap();
    write_inventory(dir.path());
    let input = InputFile {
        path: dir.path().join("a.csv"),
        mapping: climate_mapping(),
        sheet: None,
    };

    let processed = process_file(&input).unwrap();

    assert_eq!(processed.source_rows, 2);
    assert_eq!(processed.normalization.dropped_rows, 1);
    assert_eq!(processed.table.height(), 1);
    assert_eq!(processed.normalization.funding, None);
    assert!(
        processed
            .table
            .unmatched_columns()
            .contains(&CanonicalColumn::Country)
    );
    assert!(
        !processed
            .table
            .unmatched_columns()
            .contains(&CanonicalColumn::Title)
    );
}

#[test]
fn run_report_lists_every_file() {
    let dir = tempfile::tempdir().unwrap();
    write_inventory(dir.path());
    let report = dir.path().join("reports").join("run.json");
    let result = run_pipeline(&manifest(dir.path(), &["a.csv", "missing.csv"]), None).unwrap();

    write_run_report(&report, &result).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["total_rows"], 1);
    assert!(json["output"].is_null());
    let files = json["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["status"], "processed");
    assert_eq!(files[0]["mapping"], "climate");
    assert_eq!(files[0]["rows"], 1);
    assert_eq!(files[1]["status"], "failed");
    assert!(files[1]["error"].as_str().unwrap().contains("missing.csv"));
}
