//! Property tests for grid completeness, conservation and determinism.

use std::collections::{BTreeMap, BTreeSet};
use std::num::NonZeroU32;

use bnf_core::aggregate;
use bnf_model::{AggregationOptions, CodelistEntry, CostOverride, PrescribingRecord};
use proptest::prelude::*;
use rust_decimal::Decimal;

const PROVIDERS: [&str; 4] = ["84H00", "00P00", "13T00", "99Z00"];
const PREFIXES: [&str; 5] = ["0501", "05011", "040702", "0302000", "0301011R0"];
const CODES: [&str; 6] = [
    "0501123", "0501013A0", "0407020B0", "0302000C0", "0301011R0", "1001010",
];

fn record_strategy() -> impl Strategy<Value = PrescribingRecord> {
    (
        prop::sample::select(PROVIDERS.to_vec()),
        prop::sample::select(CODES.to_vec()),
        0i64..500,
        0i64..10_000,
        0i64..100_000,
    )
        .prop_map(|(provider, code, items, qty_tenths, cost_pence)| {
            PrescribingRecord::new(
                provider,
                code,
                items,
                Decimal::new(qty_tenths, 1),
                Decimal::new(cost_pence, 2),
            )
        })
}

fn codelist_strategy() -> impl Strategy<Value = Vec<CodelistEntry>> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["Antibacterials", "Opioids", "Inhalers", "Steroids"]),
            prop::sample::select(PREFIXES.to_vec()),
        ),
        0..8,
    )
    .prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(category, prefix)| CodelistEntry::new(category, prefix))
            .collect()
    })
}

fn matching_items(records: &[PrescribingRecord], codelist: &[CodelistEntry], category: &str) -> i64 {
    let allow: BTreeSet<String> = AggregationOptions::default()
        .provider_allow_list
        .into_iter()
        .collect();
    let prefixes: Vec<&str> = codelist
        .iter()
        .filter(|entry| entry.category == category)
        .map(|entry| entry.bnf_prefix.as_str())
        .collect();
    records
        .iter()
        .filter(|record| allow.contains(&record.provider_code))
        .filter(|record| record.matches_any_prefix(prefixes.as_slice()))
        .map(|record| record.items)
        .sum()
}

proptest! {
    #[test]
    fn grid_is_dense_and_unique(
        records in prop::collection::vec(record_strategy(), 0..40),
        codelist in codelist_strategy(),
    ) {
        let outcome = aggregate(&records, &codelist, &AggregationOptions::default()).unwrap();
        let grid = &outcome.grid;

        let categories: BTreeSet<&str> = codelist.iter().map(|e| e.category.as_str()).collect();
        prop_assert_eq!(grid.categories.len(), categories.len());
        prop_assert_eq!(grid.len(), grid.providers.len() * grid.categories.len());

        let pairs: BTreeSet<(&str, &str)> = grid
            .iter()
            .map(|row| (row.provider_code.as_str(), row.category.as_str()))
            .collect();
        prop_assert_eq!(pairs.len(), grid.len());
        prop_assert!(grid.providers.iter().all(|p| p != "99Z00"));
    }

    #[test]
    fn items_are_conserved_per_category(
        records in prop::collection::vec(record_strategy(), 0..40),
        codelist in codelist_strategy(),
    ) {
        let outcome = aggregate(&records, &codelist, &AggregationOptions::default()).unwrap();
        for category in &outcome.grid.categories {
            prop_assert_eq!(
                outcome.grid.category_totals(category).unwrap().items,
                matching_items(&records, &codelist, category)
            );
        }
    }

    #[test]
    fn runs_are_deterministic(
        records in prop::collection::vec(record_strategy(), 0..40),
        codelist in codelist_strategy(),
    ) {
        let first = aggregate(&records, &codelist, &AggregationOptions::default()).unwrap();
        let second = aggregate(&records, &codelist, &AggregationOptions::default()).unwrap();
        prop_assert_eq!(first.grid, second.grid);
    }

    #[test]
    fn override_cost_is_items_times_multiplier(
        records in prop::collection::vec(record_strategy(), 0..40),
        codelist in codelist_strategy(),
        multiplier in 1u32..20,
    ) {
        let multipliers = BTreeMap::from([(
            "Opioids".to_string(),
            NonZeroU32::new(multiplier).unwrap(),
        )]);
        let options = AggregationOptions::default()
            .with_cost_override(CostOverride::new(multipliers).with_enabled(true));
        let outcome = aggregate(&records, &codelist, &options).unwrap();
        for row in outcome.grid.iter().filter(|row| row.category == "Opioids") {
            prop_assert_eq!(row.estimated_cost, Decimal::from(row.items) * Decimal::from(multiplier));
        }
    }
}
