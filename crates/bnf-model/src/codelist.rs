use serde::{Deserialize, Serialize};

/// A single (category, BNF prefix) row of a codelist table.
///
/// Several entries may share a category. Category names are case-sensitive
/// and are copied verbatim into the output grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodelistEntry {
    pub category: String,
    pub bnf_prefix: String,
}

impl CodelistEntry {
    pub fn new(category: impl Into<String>, bnf_prefix: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            bnf_prefix: bnf_prefix.into(),
        }
    }
}
