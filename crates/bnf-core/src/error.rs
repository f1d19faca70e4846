//! Error types for the aggregation engine.

use bnf_model::InputTable;
use thiserror::Error;

/// Errors that stop an aggregation run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregationError {
    /// A required input table was not supplied.
    #[error("missing input: no {table} table was provided")]
    MissingInput { table: InputTable },

    /// A codelist entry has an empty category or prefix.
    #[error("invalid codelist entry {position}: {reason}")]
    InvalidCodelist {
        /// One-based position of the entry in the codelist table.
        position: usize,
        reason: &'static str,
    },

    /// A summed measure does not fit its numeric type.
    #[error("sum overflowed for provider {provider_code} in category '{category}'")]
    Overflow {
        provider_code: String,
        category: String,
    },
}

/// Result type for aggregation operations.
pub type Result<T> = std::result::Result<T, AggregationError>;
