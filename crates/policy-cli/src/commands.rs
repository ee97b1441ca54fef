use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info_span;

use policy_cli::pipeline::{run_pipeline_with_progress, write_run_report};
use policy_cli::types::RunResult;
use policy_model::{CanonicalColumn, Manifest, MappingRule, ModelError, builtin_mapping};

use crate::cli::{BuildArgs, MappingArgs};
use crate::summary::{ConsoleProgress, apply_table_style};

pub fn run_build(args: &BuildArgs) -> Result<RunResult> {
    let manifest = match &args.manifest {
        Some(path) => Manifest::load(path, &args.input_dir)
            .with_context(|| format!("load manifest {}", path.display()))?,
        None => Manifest::builtin(&args.input_dir),
    };
    let span = info_span!("build", files = manifest.len());
    let _guard = span.enter();

    let output = (!args.dry_run).then_some(args.output.as_path());
    let result = run_pipeline_with_progress(&manifest, output, &mut ConsoleProgress)?;
    if let Some(path) = &args.report {
        write_run_report(path, &result)?;
    }
    Ok(result)
}

pub fn run_schema() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["#", "Column"]);
    apply_table_style(&mut table);
    for column in CanonicalColumn::ALL {
        table.add_row(vec![(column.position() + 1).to_string(), column.name().to_string()]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_mapping(args: &MappingArgs) -> Result<()> {
    let mapping = builtin_mapping(&args.name).ok_or_else(|| ModelError::UnknownMapping {
        name: args.name.clone(),
    })?;
    let mut table = Table::new();
    table.set_header(vec!["Column", "Rule", "Source columns"]);
    apply_table_style(&mut table);
    for (column, rule) in mapping.rules() {
        let kind = match rule {
            MappingRule::Single(_) => "single",
            MappingRule::Candidates(_) => "first present",
            MappingRule::Absent => "absent",
        };
        let sources = if rule.is_absent() {
            "-".to_string()
        } else {
            rule.source_names()
                .iter()
                .map(|name| name.replace('\n', "\\n"))
                .collect::<Vec<_>>()
                .join("\n")
        };
        table.add_row(vec![column.name().to_string(), kind.to_string(), sources]);
    }
    println!("Mapping: {}", mapping.name());
    println!("{table}");
    Ok(())
}
