use std::path::PathBuf;

use bnf_model::AggregationOptions;
use bnf_core::AggregationOutcome;
use bnf_output::OutputFormat;

#[derive(Debug)]
pub struct AggregateResult {
    pub prescribing: PathBuf,
    pub codelist_label: String,
    pub record_count: usize,
    pub options: AggregationOptions,
    pub outcome: AggregationOutcome,
    pub output: Option<(PathBuf, OutputFormat)>,
    pub show_table: bool,
}

#[derive(Debug)]
pub struct PresetSummary {
    pub name: &'static str,
    pub description: &'static str,
    pub categories: usize,
    pub prefixes: usize,
}
