//! Typed loaders for the prescribing and codelist tables.

use std::path::Path;
use std::time::Instant;

use bnf_model::{CodelistEntry, InputTable, PrescribingRecord};
use polars::prelude::{DataFrame, DataType};
use tracing::{debug, info};

use crate::csv::{check_file_size, read_csv_frame, read_csv_schema, validate_encoding};
use crate::error::{IngestError, Result};
use crate::parse::{parse_decimal, parse_items};
use crate::schema::{CODELIST_COLUMNS, ColumnSpec, PRESCRIBING_COLUMNS, resolve_columns};

/// Loads a prescribing extract from a CSV file.
///
/// The header is checked against the required columns before any data row
/// is read.
pub fn load_prescribing_records(path: &Path) -> Result<Vec<PrescribingRecord>> {
    let start = Instant::now();
    let df = read_table(path, InputTable::Prescribing, &PRESCRIBING_COLUMNS)?;
    let records = prescribing_records_from_frame(&df)?;
    info!(
        path = %path.display(),
        record_count = records.len(),
        duration_ms = start.elapsed().as_millis(),
        "loaded prescribing records"
    );
    Ok(records)
}

/// Loads a (category, BNF prefix) codelist from a CSV file.
pub fn load_codelist(path: &Path) -> Result<Vec<CodelistEntry>> {
    let df = read_table(path, InputTable::Codelist, &CODELIST_COLUMNS)?;
    let entries = codelist_from_frame(&df)?;
    info!(
        path = %path.display(),
        entry_count = entries.len(),
        "loaded codelist"
    );
    Ok(entries)
}

fn read_table(path: &Path, table: InputTable, specs: &[ColumnSpec]) -> Result<DataFrame> {
    check_file_size(path)?;
    validate_encoding(path)?;
    let headers = read_csv_schema(path)?;
    let resolved = resolve_columns(table, &headers.columns, specs)?;
    debug!(%table, columns = ?resolved, "resolved input columns");
    read_csv_frame(path)
}

/// Types the rows of a string frame as prescribing records.
///
/// Fully blank rows are skipped. Blank measures read as zero; unparseable
/// measures are an [`IngestError::InvalidValue`].
pub fn prescribing_records_from_frame(df: &DataFrame) -> Result<Vec<PrescribingRecord>> {
    let table = InputTable::Prescribing;
    let names = column_names(df);
    let resolved = resolve_columns(table, &names, &PRESCRIBING_COLUMNS)?;

    let providers = string_values(df, resolved[0])?;
    let drug_codes = string_values(df, resolved[1])?;
    let items = string_values(df, resolved[2])?;
    let quantities = string_values(df, resolved[3])?;
    let costs = string_values(df, resolved[4])?;

    let mut records = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let row = [
            &providers[idx],
            &drug_codes[idx],
            &items[idx],
            &quantities[idx],
            &costs[idx],
        ];
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        let invalid = |column: &'static str, value: &str| IngestError::InvalidValue {
            table,
            column,
            row: idx + 1,
            value: value.to_string(),
        };
        records.push(PrescribingRecord {
            provider_code: providers[idx].clone(),
            drug_code: drug_codes[idx].clone(),
            items: parse_items(&items[idx]).ok_or_else(|| invalid("items", &items[idx]))?,
            quantity_x_items: parse_decimal(&quantities[idx])
                .ok_or_else(|| invalid("quantity_x_items", &quantities[idx]))?,
            estimated_cost: parse_decimal(&costs[idx])
                .ok_or_else(|| invalid("estimated_cost", &costs[idx]))?,
            source_row: Some(idx + 1),
        });
    }
    Ok(records)
}

/// Types the rows of a string frame as codelist entries.
///
/// Fully blank rows are skipped; half-empty rows are kept so the engine can
/// reject them.
pub fn codelist_from_frame(df: &DataFrame) -> Result<Vec<CodelistEntry>> {
    let names = column_names(df);
    let resolved = resolve_columns(InputTable::Codelist, &names, &CODELIST_COLUMNS)?;
    let categories = string_values(df, resolved[0])?;
    let prefixes = string_values(df, resolved[1])?;

    Ok(categories
        .into_iter()
        .zip(prefixes)
        .filter(|(category, prefix)| !(category.is_empty() && prefix.is_empty()))
        .map(|(category, bnf_prefix)| CodelistEntry {
            category,
            bnf_prefix,
        })
        .collect())
}

fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.as_str().to_string())
        .collect()
}

/// Reads a column as trimmed strings; nulls become empty strings.
fn string_values(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let column = df.column(name)?.cast(&DataType::String)?;
    let values = column
        .str()?
        .iter()
        .map(|value| value.map(str::trim).unwrap_or_default().to_string())
        .collect();
    Ok(values)
}
