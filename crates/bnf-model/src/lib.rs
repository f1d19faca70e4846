//! Data model for BNF code aggregation.
//!
//! This crate holds the plain types that flow between the ingest layer,
//! the aggregation engine and the exporters:
//!
//! - [`PrescribingRecord`]: one dispensed-item line from a prescribing extract
//! - [`CodelistEntry`]: a (category, BNF prefix) pair
//! - [`SummaryRow`] / [`SummaryGrid`]: the completed provider × category grid
//! - [`AggregationOptions`]: provider allow-list and cost override rules

pub mod codelist;
pub mod options;
pub mod processing;
pub mod record;
pub mod summary;

pub use codelist::CodelistEntry;
pub use options::{AggregationOptions, CostOverride, DEFAULT_PROVIDER_ALLOW_LIST};
pub use processing::{ExcludedRecord, InputTable, RecordIssue};
pub use record::PrescribingRecord;
pub use summary::{CURRENCY_SCALE, Measures, SummaryGrid, SummaryRow, to_currency};
