use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use policy_cli::pipeline::Progress;
use policy_cli::types::{FileOutcome, FileStatus, RunResult};
use policy_model::InputFile;

/// Prints one line when a file starts and one when it finishes.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn started(&mut self, input: &InputFile) {
        println!("Processing {}...", input.path.display());
    }

    fn finished(&mut self, outcome: &FileOutcome) {
        match &outcome.status {
            FileStatus::Processed { rows, .. } => {
                println!("Standardized {rows} rows from {}.", file_label(&outcome.path));
            }
            FileStatus::Failed { .. } => {
                println!("Skipped {}: see errors below.", file_label(&outcome.path));
            }
        }
    }
}

pub fn print_summary(result: &RunResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Mapping"),
        header_cell("Status"),
        header_cell("Rows"),
        header_cell("Dropped"),
        header_cell("Unmatched"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);

    let mut total_dropped = 0usize;
    for outcome in &result.files {
        let (rows, dropped) = match &outcome.status {
            FileStatus::Processed {
                rows, dropped_rows, ..
            } => (Cell::new(rows), count_cell(*dropped_rows, Color::Yellow)),
            FileStatus::Failed { .. } => (dim_cell("-"), dim_cell("-")),
        };
        if let FileStatus::Processed { dropped_rows, .. } = outcome.status {
            total_dropped += dropped_rows;
        }
        table.add_row(vec![
            Cell::new(file_label(&outcome.path)),
            Cell::new(&outcome.mapping),
            status_cell(outcome),
            rows,
            dropped,
            count_cell(outcome.unmatched_columns.len(), Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(format!(
            "{}/{}",
            result.processed_count(),
            result.files.len()
        ))
        .add_attribute(Attribute::Bold),
        Cell::new(result.total_rows).add_attribute(Attribute::Bold),
        count_cell(total_dropped, Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");

    if result.has_data() {
        match &result.output {
            Some(path) => println!("Output: {}", path.display()),
            None => println!("Output: not written (dry run)"),
        }
        println!("Total rows in master dataset: {}", result.total_rows);
    } else {
        println!("No data was processed. Please check file paths and errors.");
    }

    let failures: Vec<(&FileOutcome, &str)> = result
        .files
        .iter()
        .filter_map(|outcome| match &outcome.status {
            FileStatus::Failed { error } => Some((outcome, error.as_str())),
            FileStatus::Processed { .. } => None,
        })
        .collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for (outcome, error) in failures {
            eprintln!("- {}: {error}", outcome.path.display());
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map_or_else(|| path.display().to_string(), str::to_string)
}

fn status_cell(outcome: &FileOutcome) -> Cell {
    if outcome.is_processed() {
        Cell::new("OK").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        Cell::new("FAILED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
