//! Per-category summation of prescribing measures.

use std::collections::BTreeMap;

use bnf_model::{CostOverride, Measures, PrescribingRecord};
use rust_decimal::Decimal;
use tracing::trace;

use crate::error::{AggregationError, Result};

/// Summed measures for one (provider, category) pair with at least one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub provider_code: String,
    pub category: String,
    pub measures: Measures,
}

/// Sums the records matching any of `prefixes`, grouped by provider.
///
/// Providers without a matching record produce no row. When `cost_override`
/// carries an active multiplier for `category`, the summed cost is replaced by
/// `items × multiplier`. Rows come back ordered by provider code.
///
/// # Errors
///
/// Returns [`AggregationError::Overflow`] if a provider's sum does not fit.
pub fn aggregate_category(
    records: &[&PrescribingRecord],
    prefixes: &[String],
    category: &str,
    cost_override: &CostOverride,
) -> Result<Vec<CategoryTotal>> {
    let mut by_provider: BTreeMap<&str, Measures> = BTreeMap::new();
    for record in records
        .iter()
        .copied()
        .filter(|record| record.matches_any_prefix(prefixes))
    {
        let sum = by_provider
            .entry(record.provider_code.as_str())
            .or_default();
        *sum = sum
            .checked_add(Measures {
                items: record.items,
                quantity_x_items: record.quantity_x_items,
                estimated_cost: record.estimated_cost,
            })
            .ok_or_else(|| overflow(&record.provider_code, category))?;
    }

    let multiplier = cost_override.multiplier_for(category);
    if let Some(multiplier) = multiplier {
        trace!(category, multiplier = multiplier.get(), "applying cost override");
    }

    by_provider
        .into_iter()
        .map(|(provider_code, mut measures)| {
            if let Some(multiplier) = multiplier {
                measures.estimated_cost = Decimal::from(measures.items)
                    .checked_mul(Decimal::from(multiplier.get()))
                    .ok_or_else(|| overflow(provider_code, category))?;
            }
            Ok(CategoryTotal {
                provider_code: provider_code.to_string(),
                category: category.to_string(),
                measures,
            })
        })
        .collect()
}

fn overflow(provider_code: &str, category: &str) -> AggregationError {
    AggregationError::Overflow {
        provider_code: provider_code.to_string(),
        category: category.to_string(),
    }
}
