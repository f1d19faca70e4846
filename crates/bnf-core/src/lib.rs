//! BNF code aggregation engine.
//!
//! Turns a prescribing extract and a category codelist into a dense
//! provider × category grid:
//!
//! 1. [`CodelistIndex`] groups (category, prefix) entries by category
//! 2. [`filter_records`] keeps allow-listed providers and screens out negative measures
//! 3. [`aggregate_category`] sums items, quantity and cost per provider for one category
//! 4. [`complete_grid`] builds the cross product and zero-fills missing pairs
//!
//! [`AggregationEngine`] wires the stages together.
//!
//! # Example
//!
//! ```
//! use bnf_core::aggregate;
//! use bnf_model::{AggregationOptions, CodelistEntry, PrescribingRecord};
//! use rust_decimal::Decimal;
//!
//! let records = vec![PrescribingRecord::new(
//!     "84H00",
//!     "0501123",
//!     5,
//!     Decimal::from(10),
//!     Decimal::new(1250, 2),
//! )];
//! let codelist = vec![CodelistEntry::new("Antibacterials", "0501")];
//!
//! let outcome = aggregate(&records, &codelist, &AggregationOptions::default())?;
//! let row = outcome.grid.get("84H00", "Antibacterials").unwrap();
//! assert_eq!(row.items, 5);
//! assert_eq!(row.estimated_cost.to_string(), "12.50");
//! # Ok::<(), bnf_core::AggregationError>(())
//! ```

mod aggregate;
mod codelist;
mod engine;
mod error;
mod filter;
mod grid;

pub use aggregate::{CategoryTotal, aggregate_category};
pub use codelist::CodelistIndex;
pub use engine::{AggregationEngine, AggregationOutcome, aggregate};
pub use error::{AggregationError, Result};
pub use filter::{FilteredRecords, filter_records};
pub use grid::complete_grid;
