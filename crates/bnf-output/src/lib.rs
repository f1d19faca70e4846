//! Export of completed summary grids.
//!
//! - **CSV**: canonical header, costs always with two decimals
//! - **JSON**: array of row objects, decimals as strings
//!
//! [`format_count`], [`format_quantity`] and [`format_gbp`] render values for
//! terminal display.

mod error;
mod format;
mod writer;

pub use error::{OutputError, Result};
pub use format::{OutputFormat, format_count, format_gbp, format_quantity};
pub use writer::{
    SUMMARY_HEADER, render_summary, write_summary, write_summary_csv, write_summary_json,
};
