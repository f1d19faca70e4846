//! CSV header parsing and normalization.

/// Column names read from the first line of a CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvHeaders {
    /// Trimmed column names, in file order.
    pub columns: Vec<String>,
}

impl CsvHeaders {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Builds headers from a parsed header record, normalizing each name.
    pub fn from_record(record: &::csv::StringRecord) -> Self {
        Self::new(record.iter().map(normalize_header).collect())
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns true if every header cell is blank.
    pub fn is_blank(&self) -> bool {
        self.columns.iter().all(String::is_empty)
    }
}

/// Normalizes a header value by trimming whitespace and a leading BOM.
pub fn normalize_header(value: &str) -> String {
    value.trim().trim_start_matches('\u{feff}').trim().to_string()
}
