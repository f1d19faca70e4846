use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One dispensed-item line from a prescribing extract.
///
/// Item counts are signed so that dirty input (negative counts) survives
/// typing and can be reported by the engine instead of failing ingest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescribingRecord {
    pub provider_code: String,
    pub drug_code: String,
    pub items: i64,
    pub quantity_x_items: Decimal,
    pub estimated_cost: Decimal,
    /// One-based data row in the file the record was loaded from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_row: Option<usize>,
}

impl PrescribingRecord {
    pub fn new(
        provider_code: impl Into<String>,
        drug_code: impl Into<String>,
        items: i64,
        quantity_x_items: Decimal,
        estimated_cost: Decimal,
    ) -> Self {
        Self {
            provider_code: provider_code.into(),
            drug_code: drug_code.into(),
            items,
            quantity_x_items,
            estimated_cost,
            source_row: None,
        }
    }

    #[must_use]
    pub fn with_source_row(mut self, row: usize) -> Self {
        self.source_row = Some(row);
        self
    }

    /// Returns true if the drug code starts with any of the given prefixes.
    pub fn matches_any_prefix<S: AsRef<str>>(&self, prefixes: &[S]) -> bool {
        prefixes
            .iter()
            .any(|prefix| self.drug_code.starts_with(prefix.as_ref()))
    }
}
