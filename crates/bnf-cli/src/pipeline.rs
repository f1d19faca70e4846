//! Aggregation pipeline with explicit stages.
//!
//! 1. **Settings**: load the allow-list and cost multipliers
//! 2. **Ingest**: read the prescribing extract and the codelist
//! 3. **Aggregate**: run the engine
//! 4. **Export**: write the grid to a file or a string
//!
//! Each stage is a free function so the binary and the tests drive the same code.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use bnf_core::{AggregationEngine, AggregationError, AggregationOutcome};
use bnf_model::{AggregationOptions, CodelistEntry, InputTable, PrescribingRecord};
use bnf_output::{OutputFormat, render_summary, write_summary};
use bnf_presets::{CodelistPreset, Settings};

// ============================================================================
// Inputs
// ============================================================================

/// Where the codelist comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodelistSource {
    File(PathBuf),
    Preset(CodelistPreset),
}

impl CodelistSource {
    /// Picks the source from the `--codelist` / `--preset` pair.
    ///
    /// Returns `None` when neither is given.
    pub fn from_args(path: Option<&Path>, preset: Option<&str>) -> Result<Option<Self>> {
        match (path, preset) {
            (Some(path), _) => Ok(Some(Self::File(path.to_path_buf()))),
            (None, Some(name)) => Ok(Some(Self::Preset(name.parse()?))),
            (None, None) => Ok(None),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Preset(preset) => format!("preset:{preset}"),
        }
    }
}

/// One aggregation request, as assembled from the command line.
#[derive(Debug, Clone)]
pub struct AggregateRequest {
    pub prescribing: PathBuf,
    pub codelist: Option<CodelistSource>,
    /// Settings file; `None` uses the bundled reference settings.
    pub settings: Option<PathBuf>,
    pub apply_cost_override: bool,
}

// ============================================================================
// Stage 1: Settings
// ============================================================================

/// Resolves engine options from a settings file or the reference settings.
pub fn resolve_options(settings: Option<&Path>, apply_cost_override: bool) -> Result<AggregationOptions> {
    let settings = match settings {
        Some(path) => Settings::load(path)?,
        None => Settings::reference().context("load reference settings")?,
    };
    Ok(settings.to_options(apply_cost_override))
}

// ============================================================================
// Stage 2: Ingest
// ============================================================================

/// Typed inputs of one run.
#[derive(Debug)]
pub struct IngestResult {
    pub records: Vec<PrescribingRecord>,
    pub codelist: Vec<CodelistEntry>,
    pub codelist_label: String,
}

/// Loads both input tables.
///
/// A missing codelist source is reported as
/// [`AggregationError::MissingInput`] before any file is read.
pub fn ingest(prescribing: &Path, codelist: Option<&CodelistSource>) -> Result<IngestResult> {
    let source = codelist.ok_or(AggregationError::MissingInput {
        table: InputTable::Codelist,
    })?;

    let records = bnf_ingest::load_prescribing_records(prescribing)
        .with_context(|| format!("load prescribing records from {}", prescribing.display()))?;
    let codelist = match source {
        CodelistSource::File(path) => bnf_ingest::load_codelist(path)
            .with_context(|| format!("load codelist from {}", path.display()))?,
        CodelistSource::Preset(preset) => preset.load()?,
    };

    Ok(IngestResult {
        records,
        codelist,
        codelist_label: source.label(),
    })
}

// ============================================================================
// Stage 3: Aggregate
// ============================================================================

/// Result of a full pipeline run.
#[derive(Debug)]
pub struct PipelineResult {
    pub outcome: AggregationOutcome,
    pub options: AggregationOptions,
    pub record_count: usize,
    pub codelist_label: String,
}

/// Runs settings, ingest and aggregation.
pub fn run_pipeline(request: &AggregateRequest) -> Result<PipelineResult> {
    let span = info_span!("pipeline", prescribing = %request.prescribing.display());
    let _guard = span.enter();

    let options = resolve_options(request.settings.as_deref(), request.apply_cost_override)?;

    let ingest_start = Instant::now();
    let IngestResult {
        records,
        codelist,
        codelist_label,
    } = ingest(&request.prescribing, request.codelist.as_ref())?;
    info!(
        record_count = records.len(),
        codelist_entries = codelist.len(),
        codelist = %codelist_label,
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    let engine = AggregationEngine::new(options);
    let outcome = engine.run(&records, &codelist)?;

    Ok(PipelineResult {
        outcome,
        options: engine.options().clone(),
        record_count: records.len(),
        codelist_label,
    })
}

// ============================================================================
// Stage 4: Export
// ============================================================================

/// Writes the grid to `path`, or renders it to a string when `path` is `None`.
pub fn export(
    outcome: &AggregationOutcome,
    format: OutputFormat,
    path: Option<&Path>,
) -> Result<Option<String>> {
    match path {
        Some(path) => {
            write_summary(&outcome.grid, format, path)?;
            Ok(None)
        }
        None => Ok(Some(render_summary(&outcome.grid, format)?)),
    }
}
