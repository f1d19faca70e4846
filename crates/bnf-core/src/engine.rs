//! Aggregation engine: codelist index -> filter -> per-category totals -> grid.

use std::time::Instant;

use bnf_model::{AggregationOptions, CodelistEntry, ExcludedRecord, PrescribingRecord, SummaryGrid};
use tracing::{info, info_span, warn};

use crate::aggregate::{CategoryTotal, aggregate_category};
use crate::codelist::CodelistIndex;
use crate::error::Result;
use crate::filter::filter_records;
use crate::grid::complete_grid;

/// Completed grid plus diagnostics for one run.
#[derive(Debug, Clone, Default)]
pub struct AggregationOutcome {
    pub grid: SummaryGrid,
    /// Allow-listed records dropped for invalid measures.
    pub excluded: Vec<ExcludedRecord>,
    /// Records whose provider is not allow-listed.
    pub outside_allow_list: usize,
    /// Records that took part in category matching.
    pub aggregated_records: usize,
}

impl AggregationOutcome {
    pub fn has_exclusions(&self) -> bool {
        !self.excluded.is_empty()
    }
}

/// Stateless engine configured with an allow-list and cost override rules.
#[derive(Debug, Clone, Default)]
pub struct AggregationEngine {
    options: AggregationOptions,
}

impl AggregationEngine {
    pub fn new(options: AggregationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AggregationOptions {
        &self.options
    }

    /// Runs one aggregation pass over borrowed inputs.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::InvalidCodelist`](crate::AggregationError::InvalidCodelist)
    /// if a codelist entry has an empty category or prefix, and
    /// [`AggregationError::Overflow`](crate::AggregationError::Overflow) if a
    /// summed measure does not fit. An empty codelist or
    /// an empty filtered record set is not an error; it yields an empty grid.
    pub fn run(
        &self,
        records: &[PrescribingRecord],
        codelist: &[CodelistEntry],
    ) -> Result<AggregationOutcome> {
        let span = info_span!(
            "aggregate",
            record_count = records.len(),
            codelist_entries = codelist.len()
        );
        let _guard = span.enter();
        let start = Instant::now();

        let index = CodelistIndex::build(codelist)?;
        self.warn_unknown_multipliers(&index);

        let filtered = filter_records(records, &self.options.provider_allow_list);

        let mut totals: Vec<CategoryTotal> = Vec::new();
        for (category, prefixes) in index.iter() {
            totals.extend(aggregate_category(
                &filtered.records,
                prefixes,
                category,
                &self.options.cost_override,
            )?);
        }

        let categories: Vec<String> = index.categories().map(ToString::to_string).collect();
        let grid = complete_grid(&filtered.providers, &categories, &totals)?;

        info!(
            provider_count = grid.providers.len(),
            category_count = grid.categories.len(),
            row_count = grid.len(),
            excluded = filtered.excluded.len(),
            outside_allow_list = filtered.outside_allow_list,
            cost_override = self.options.cost_override.enabled,
            duration_ms = start.elapsed().as_millis(),
            "aggregation complete"
        );

        Ok(AggregationOutcome {
            grid,
            excluded: filtered.excluded,
            outside_allow_list: filtered.outside_allow_list,
            aggregated_records: filtered.records.len(),
        })
    }

    fn warn_unknown_multipliers(&self, index: &CodelistIndex) {
        let cost_override = &self.options.cost_override;
        if !cost_override.enabled {
            return;
        }
        for category in cost_override.multipliers.keys() {
            if index.prefixes(category).is_none() {
                warn!(
                    category = %category,
                    "cost multiplier configured for a category absent from the codelist"
                );
            }
        }
    }
}

/// Runs the engine once with the given options.
pub fn aggregate(
    records: &[PrescribingRecord],
    codelist: &[CodelistEntry],
    options: &AggregationOptions,
) -> Result<AggregationOutcome> {
    AggregationEngine::new(options.clone()).run(records, codelist)
}
