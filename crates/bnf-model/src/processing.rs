use std::fmt;

use serde::{Deserialize, Serialize};

/// The two tables an aggregation run consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputTable {
    Prescribing,
    Codelist,
}

impl InputTable {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Prescribing => "prescribing records",
            Self::Codelist => "codelist",
        }
    }
}

impl fmt::Display for InputTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a record was left out of every sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordIssue {
    NegativeItems,
    NegativeQuantity,
    NegativeCost,
}

impl fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NegativeItems => "negative item count",
            Self::NegativeQuantity => "negative quantity x items",
            Self::NegativeCost => "negative estimated cost",
        };
        f.write_str(text)
    }
}

/// A record excluded from aggregation because of invalid measures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedRecord {
    /// One-based data row: the source file row when known, otherwise the
    /// position in the caller's record slice.
    pub row: usize,
    pub provider_code: String,
    pub drug_code: String,
    pub issue: RecordIssue,
}

impl fmt::Display for ExcludedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {} ({} / {}): {}",
            self.row, self.provider_code, self.drug_code, self.issue
        )
    }
}
