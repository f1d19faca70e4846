//! Prescribing data ingestion.
//!
//! Loads the two input tables of an aggregation run from CSV files into
//! typed records:
//!
//! - **Prescribing extract**: `provider_code`, `drug_code`, `items`,
//!   `quantity_x_items`, `estimated_cost`
//! - **Codelist**: `category`, `bnf_prefix`
//!
//! Headers are matched case-insensitively and also accept the labels used by
//! ePACT-style extracts (`Commissioner/Provider Code`, `BNF Code`, ...).
//! Files are read with Polars as string columns and typed here, so currency
//! amounts are parsed straight into exact decimals.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use bnf_ingest::{load_codelist, load_prescribing_records};
//!
//! let records = load_prescribing_records(Path::new("data/epact_2024_q1.csv"))?;
//! let codelist = load_codelist(Path::new("data/codelist.csv"))?;
//! ```

mod csv;
mod error;
mod parse;
mod schema;
mod tables;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use crate::csv::{CsvHeaders, MAX_CSV_FILE_SIZE, read_csv_frame, read_csv_schema};

// === Schema ===
pub use schema::{
    CODELIST_COLUMNS, ColumnSpec, PRESCRIBING_COLUMNS, column_key, resolve_columns,
};

// === Typed Tables ===
pub use parse::{parse_decimal, parse_items};
pub use tables::{
    codelist_from_frame, load_codelist, load_prescribing_records, prescribing_records_from_frame,
};
