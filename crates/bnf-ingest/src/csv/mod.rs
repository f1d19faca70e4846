//! CSV reading utilities.

mod header;
mod reader;

pub use header::CsvHeaders;
pub use reader::{
    MAX_CSV_FILE_SIZE, check_file_size, read_csv_frame, read_csv_schema, validate_encoding,
};
