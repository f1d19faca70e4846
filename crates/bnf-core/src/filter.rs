//! Provider allow-list filtering and invalid-record screening.

use std::collections::HashSet;

use bnf_model::{ExcludedRecord, PrescribingRecord, RecordIssue};
use tracing::{debug, warn};

/// Records that survived the allow-list, plus what was dropped on the way.
#[derive(Debug, Clone, Default)]
pub struct FilteredRecords<'a> {
    /// Allow-listed records with valid (non-negative) measures.
    pub records: Vec<&'a PrescribingRecord>,
    /// Allow-listed providers in order of first appearance.
    pub providers: Vec<String>,
    /// Allow-listed records left out of every sum.
    pub excluded: Vec<ExcludedRecord>,
    /// Number of records whose provider is not allow-listed.
    pub outside_allow_list: usize,
}

/// Keeps records whose provider is in `allow_list`, screening out negative measures.
///
/// A provider whose only records are invalid still appears in `providers`.
pub fn filter_records<'a, S: AsRef<str>>(
    records: &'a [PrescribingRecord],
    allow_list: &[S],
) -> FilteredRecords<'a> {
    let allowed: HashSet<&str> = allow_list.iter().map(AsRef::as_ref).collect();
    let mut filtered = FilteredRecords::default();
    let mut seen_providers: HashSet<&str> = HashSet::new();

    for (index, record) in records.iter().enumerate() {
        if !allowed.contains(record.provider_code.as_str()) {
            filtered.outside_allow_list += 1;
            continue;
        }
        if seen_providers.insert(record.provider_code.as_str()) {
            filtered.providers.push(record.provider_code.clone());
        }
        match record_issue(record) {
            Some(issue) => {
                let row = record.source_row.unwrap_or(index + 1);
                warn!(
                    row,
                    provider_code = %record.provider_code,
                    drug_code = %record.drug_code,
                    %issue,
                    "excluding invalid prescribing record"
                );
                filtered.excluded.push(ExcludedRecord {
                    row,
                    provider_code: record.provider_code.clone(),
                    drug_code: record.drug_code.clone(),
                    issue,
                });
            }
            None => filtered.records.push(record),
        }
    }

    debug!(
        kept = filtered.records.len(),
        excluded = filtered.excluded.len(),
        outside_allow_list = filtered.outside_allow_list,
        provider_count = filtered.providers.len(),
        "filtered prescribing records"
    );
    filtered
}

fn record_issue(record: &PrescribingRecord) -> Option<RecordIssue> {
    if record.items < 0 {
        Some(RecordIssue::NegativeItems)
    } else if record.quantity_x_items.is_sign_negative() && !record.quantity_x_items.is_zero() {
        Some(RecordIssue::NegativeQuantity)
    } else if record.estimated_cost.is_sign_negative() && !record.estimated_cost.is_zero() {
        Some(RecordIssue::NegativeCost)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(provider: &str, items: i64) -> PrescribingRecord {
        PrescribingRecord::new(provider, "0501123", items, dec!(10), dec!(1.00))
    }

    #[test]
    fn keeps_only_allow_listed_providers() {
        let records = vec![record("84H00", 1), record("99Z00", 2), record("00P00", 3)];
        let filtered = filter_records(&records, &["84H00", "00P00"]);
        assert_eq!(filtered.records.len(), 2);
        assert_eq!(filtered.providers, vec!["84H00", "00P00"]);
        assert_eq!(filtered.outside_allow_list, 1);
    }

    #[test]
    fn providers_follow_first_appearance() {
        let records = vec![record("00P00", 1), record("84H00", 1), record("00P00", 1)];
        let filtered = filter_records(&records, &["84H00", "00P00"]);
        assert_eq!(filtered.providers, vec!["00P00", "84H00"]);
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let records = vec![record("99Z00", 1)];
        let filtered = filter_records(&records, &["84H00"]);
        assert!(filtered.records.is_empty());
        assert!(filtered.providers.is_empty());
    }

    #[test]
    fn negative_measures_are_excluded_and_reported() {
        let mut negative_cost = record("84H00", 1);
        negative_cost.estimated_cost = dec!(-2.00);
        let mut negative_quantity = record("84H00", 1);
        negative_quantity.quantity_x_items = dec!(-1);
        let records = vec![record("84H00", -1), negative_cost, negative_quantity, record("84H00", 2)];

        let filtered = filter_records(&records, &["84H00"]);
        assert_eq!(filtered.records.len(), 1);
        let issues: Vec<_> = filtered.excluded.iter().map(|e| (e.row, e.issue)).collect();
        assert_eq!(
            issues,
            vec![
                (1, RecordIssue::NegativeItems),
                (2, RecordIssue::NegativeCost),
                (3, RecordIssue::NegativeQuantity),
            ]
        );
    }

    #[test]
    fn provider_with_only_invalid_records_is_kept() {
        let records = vec![record("84H00", -5)];
        let filtered = filter_records(&records, &["84H00"]);
        assert!(filtered.records.is_empty());
        assert_eq!(filtered.providers, vec!["84H00"]);
    }

    #[test]
    fn exclusions_report_the_source_row() {
        let records = vec![
            record("84H00", 1).with_source_row(2),
            record("84H00", -1).with_source_row(4),
        ];
        let filtered = filter_records(&records, &["84H00"]);
        assert_eq!(filtered.excluded[0].row, 4);
        assert_eq!(
            filtered.excluded[0].to_string(),
            "row 4 (84H00 / 0501123): negative item count"
        );
    }
}
