//! Category -> BNF prefix index built from a flat codelist table.

use std::collections::BTreeMap;

use bnf_model::CodelistEntry;

use crate::error::{AggregationError, Result};

/// Categories keyed by name, each with its ordered, de-duplicated prefixes.
///
/// Categories iterate in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodelistIndex {
    categories: BTreeMap<String, Vec<String>>,
}

impl CodelistIndex {
    /// Builds the index, rejecting entries with an empty category or prefix.
    ///
    /// Names and prefixes are kept verbatim; a value made only of whitespace
    /// counts as empty.
    pub fn build(entries: &[CodelistEntry]) -> Result<Self> {
        let mut categories: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            let category = entry.category.as_str();
            let prefix = entry.bnf_prefix.as_str();
            if category.trim().is_empty() {
                return Err(AggregationError::InvalidCodelist {
                    position: idx + 1,
                    reason: "empty category name",
                });
            }
            if prefix.trim().is_empty() {
                return Err(AggregationError::InvalidCodelist {
                    position: idx + 1,
                    reason: "empty BNF prefix",
                });
            }
            let prefixes = categories.entry(category.to_string()).or_default();
            if !prefixes.iter().any(|existing| existing == prefix) {
                prefixes.push(prefix.to_string());
            }
        }
        Ok(Self { categories })
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Category names in index order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn prefixes(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    /// (category, prefixes) pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(name, prefixes)| (name.as_str(), prefixes.as_slice()))
    }
}
