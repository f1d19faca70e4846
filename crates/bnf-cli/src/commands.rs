use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info;

use bnf_cli::pipeline::{AggregateRequest, CodelistSource, export, run_pipeline};
use bnf_core::CodelistIndex;
use bnf_output::OutputFormat;
use bnf_presets::CodelistPreset;

use crate::cli::AggregateArgs;
use crate::summary::apply_table_style;
use crate::types::{AggregateResult, PresetSummary};

pub fn run_presets() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Preset", "Categories", "Prefixes", "Description"]);
    apply_table_style(&mut table);
    for summary in preset_summaries()? {
        table.add_row(vec![
            summary.name.to_string(),
            summary.categories.to_string(),
            summary.prefixes.to_string(),
            summary.description.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn preset_summaries() -> Result<Vec<PresetSummary>> {
    CodelistPreset::all()
        .iter()
        .map(|preset| -> Result<PresetSummary> {
            let entries = preset.load()?;
            let index = CodelistIndex::build(&entries)
                .with_context(|| format!("index preset {preset}"))?;
            Ok(PresetSummary {
                name: preset.name(),
                description: preset.description(),
                categories: index.len(),
                prefixes: index.iter().map(|(_, prefixes)| prefixes.len()).sum(),
            })
        })
        .collect()
}

pub fn run_aggregate(args: &AggregateArgs) -> Result<AggregateResult> {
    let request = AggregateRequest {
        prescribing: args.prescribing.clone(),
        codelist: CodelistSource::from_args(args.codelist.as_deref(), args.preset.as_deref())?,
        settings: args.config.clone(),
        apply_cost_override: args.apply_cost_override,
    };
    let result = run_pipeline(&request)?;

    let format = OutputFormat::from(args.format);
    let output = match &args.output {
        Some(path) => {
            export(&result.outcome, format, Some(path))?;
            Some((path.clone(), format))
        }
        None if args.no_table => {
            if let Some(rendered) = export(&result.outcome, format, None)? {
                print!("{rendered}");
            }
            None
        }
        None => None,
    };

    info!(
        rows = result.outcome.grid.len(),
        excluded = result.outcome.excluded.len(),
        "aggregate command complete"
    );

    Ok(AggregateResult {
        prescribing: request.prescribing,
        codelist_label: result.codelist_label,
        record_count: result.record_count,
        options: result.options,
        outcome: result.outcome,
        output,
        show_table: !args.no_table,
    })
}
