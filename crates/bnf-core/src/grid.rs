//! Cross-product completion of aggregated category totals.

use std::collections::HashMap;

use bnf_model::{Measures, SummaryGrid, SummaryRow};

use crate::aggregate::CategoryTotal;
use crate::error::{AggregationError, Result};

/// Builds the dense providers × categories grid.
///
/// Every (provider, category) pair appears exactly once, provider-major and
/// category-minor. Totals are joined on the exact pair; pairs without a total
/// are filled with zeros. Duplicate provider or category names are collapsed
/// to their first occurrence; repeated totals for one pair are summed.
///
/// # Errors
///
/// Returns [`AggregationError::Overflow`] if repeated totals overflow.
pub fn complete_grid(
    providers: &[String],
    categories: &[String],
    totals: &[CategoryTotal],
) -> Result<SummaryGrid> {
    let providers = dedupe(providers);
    let categories = dedupe(categories);

    let mut lookup: HashMap<(&str, &str), Measures> = HashMap::with_capacity(totals.len());
    for total in totals {
        let sum = lookup
            .entry((total.provider_code.as_str(), total.category.as_str()))
            .or_default();
        *sum = sum
            .checked_add(total.measures)
            .ok_or_else(|| AggregationError::Overflow {
                provider_code: total.provider_code.clone(),
                category: total.category.clone(),
            })?;
    }

    let mut rows = Vec::with_capacity(providers.len() * categories.len());
    for provider in &providers {
        for category in &categories {
            let measures = lookup
                .get(&(provider.as_str(), category.as_str()))
                .copied()
                .unwrap_or_else(Measures::zero);
            rows.push(SummaryRow::new(provider.as_str(), category.as_str(), measures));
        }
    }

    Ok(SummaryGrid {
        providers,
        categories,
        rows,
    })
}

fn dedupe(values: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(value) {
            unique.push(value.clone());
        }
    }
    unique
}
