//! Required columns of the two input tables and header resolution.
//!
//! Headers are compared after [`column_key`] normalisation, so `BNF Code`,
//! `bnf code` and `bnf_code` all resolve to the same column.

use bnf_model::InputTable;

use crate::error::{IngestError, Result};

/// A required column with the header labels it may appear under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

impl ColumnSpec {
    fn matches(&self, key: &str) -> bool {
        column_key(self.name) == key || self.aliases.iter().any(|alias| column_key(alias) == key)
    }
}

pub const PROVIDER_CODE: ColumnSpec = ColumnSpec {
    name: "provider_code",
    aliases: &["Commissioner/Provider Code"],
};
pub const DRUG_CODE: ColumnSpec = ColumnSpec {
    name: "drug_code",
    aliases: &["BNF Code"],
};
pub const ITEMS: ColumnSpec = ColumnSpec {
    name: "items",
    aliases: &["Items"],
};
pub const QUANTITY_X_ITEMS: ColumnSpec = ColumnSpec {
    name: "quantity_x_items",
    aliases: &["Quantity X Items"],
};
pub const ESTIMATED_COST: ColumnSpec = ColumnSpec {
    name: "estimated_cost",
    aliases: &["Estimated Drug Cost GBP"],
};
pub const CATEGORY: ColumnSpec = ColumnSpec {
    name: "category",
    aliases: &["Category"],
};
pub const BNF_PREFIX: ColumnSpec = ColumnSpec {
    name: "bnf_prefix",
    aliases: &["BNF Prefix"],
};

/// Required columns of the prescribing table, in output order.
pub const PRESCRIBING_COLUMNS: [ColumnSpec; 5] =
    [PROVIDER_CODE, DRUG_CODE, ITEMS, QUANTITY_X_ITEMS, ESTIMATED_COST];

/// Required columns of the codelist table.
pub const CODELIST_COLUMNS: [ColumnSpec; 2] = [CATEGORY, BNF_PREFIX];

/// Normalises a header for comparison: lowercase, runs of non-alphanumerics become `_`.
pub fn column_key(header: &str) -> String {
    let mut key = String::with_capacity(header.len());
    let mut pending_separator = false;
    for ch in header.trim().trim_start_matches('\u{feff}').chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !key.is_empty() {
                key.push('_');
            }
            pending_separator = false;
            key.extend(ch.to_lowercase());
        } else {
            pending_separator = true;
        }
    }
    key
}

/// Maps each required column to the actual header name present in the table.
///
/// Returns the headers in the same order as `specs`. The first header that
/// matches a column spec wins; extra headers are ignored.
pub fn resolve_columns<'h, S: AsRef<str>>(
    table: InputTable,
    headers: &'h [S],
    specs: &[ColumnSpec],
) -> Result<Vec<&'h str>> {
    let keys: Vec<String> = headers.iter().map(|h| column_key(h.as_ref())).collect();
    specs
        .iter()
        .map(|spec| {
            keys.iter()
                .position(|key| spec.matches(key))
                .map(|idx| headers[idx].as_ref())
                .ok_or(IngestError::SchemaMismatch {
                    table,
                    column: spec.name,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_key_normalises_labels() {
        assert_eq!(column_key("Commissioner/Provider Code"), "commissioner_provider_code");
        assert_eq!(column_key("  Quantity X Items "), "quantity_x_items");
        assert_eq!(column_key("Estimated Drug Cost (GBP)"), "estimated_drug_cost_gbp");
        assert_eq!(column_key("bnf_prefix"), "bnf_prefix");
    }

    #[test]
    fn resolves_canonical_and_labelled_headers() {
        let headers = vec![
            "Commissioner/Provider Code",
            "BNF Code",
            "BNF Description",
            "Items",
            "Quantity X Items",
            "Estimated Drug Cost GBP",
        ];
        let resolved =
            resolve_columns(InputTable::Prescribing, &headers, &PRESCRIBING_COLUMNS).unwrap();
        assert_eq!(
            resolved,
            vec![
                "Commissioner/Provider Code",
                "BNF Code",
                "Items",
                "Quantity X Items",
                "Estimated Drug Cost GBP",
            ]
        );
    }

    #[test]
    fn missing_column_is_schema_mismatch() {
        let headers = vec!["category".to_string()];
        let result = resolve_columns(InputTable::Codelist, &headers, &CODELIST_COLUMNS);
        assert!(matches!(
            result,
            Err(IngestError::SchemaMismatch {
                table: InputTable::Codelist,
                column: "bnf_prefix",
            })
        ));
    }
}
