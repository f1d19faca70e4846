//! Grid serialization.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use bnf_model::SummaryGrid;
use tracing::info;

use crate::error::{OutputError, Result};
use crate::format::OutputFormat;

/// Writes the grid as CSV with the canonical header.
///
/// The header is written even when the grid has no rows.
pub fn write_summary_csv<W: Write>(writer: W, grid: &SummaryGrid) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(SUMMARY_HEADER)?;
    for row in grid {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes the grid as a pretty-printed JSON array of row objects.
pub fn write_summary_json<W: Write>(writer: W, grid: &SummaryGrid) -> Result<()> {
    serde_json::to_writer_pretty(writer, &grid.rows)?;
    Ok(())
}

/// Column names of the exported grid, in order.
pub const SUMMARY_HEADER: [&str; 5] = [
    "provider_code",
    "category",
    "items",
    "quantity_x_items",
    "estimated_cost",
];

/// Renders the grid in `format` to a string.
pub fn render_summary(grid: &SummaryGrid, format: OutputFormat) -> Result<String> {
    let mut buffer = Vec::new();
    match format {
        OutputFormat::Csv => write_summary_csv(&mut buffer, grid)?,
        OutputFormat::Json => {
            write_summary_json(&mut buffer, grid)?;
            buffer.push(b'\n');
        }
    }
    Ok(String::from_utf8(buffer)?)
}

/// Writes the grid to `path`, replacing any existing file.
pub fn write_summary(grid: &SummaryGrid, format: OutputFormat, path: &Path) -> Result<()> {
    let io_error = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    match format {
        OutputFormat::Csv => write_summary_csv(&mut writer, grid)?,
        OutputFormat::Json => {
            write_summary_json(&mut writer, grid)?;
            writer.write_all(b"\n").map_err(io_error)?;
        }
    }
    writer.flush().map_err(io_error)?;

    info!(
        path = %path.display(),
        format = %format,
        rows = grid.len(),
        "summary written"
    );
    Ok(())
}
