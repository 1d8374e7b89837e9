//! Delimited text parser (CSV and TSV).
//!
//! The first row holds the column names. Rows may be shorter or longer than
//! the header; short rows are padded with empty cells and extra cells are
//! dropped. Cells are typed with [`Value::infer`].

use std::io::{self, Read, Write};

use thiserror::Error;

use crate::model::{Dataset, ProteinRecord, Value};

/// Errors that can occur during delimited text parsing.
#[derive(Error, Debug)]
pub enum DelimitedError {
    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("Empty file (no header row)")]
    EmptyFile,

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Result type for delimited text operations.
pub type DelimitedResult<T> = Result<T, DelimitedError>;

/// Parses delimited text from a reader.
pub fn parse_delimited<R: Read>(reader: R, delimiter: u8) -> DelimitedResult<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DelimitedError::EmptyFile);
    }
    let columns = column_names(headers.iter());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Value::infer).collect());
    }

    Ok(Dataset::new(columns, rows))
}

/// Parses delimited text from a string.
pub fn parse_delimited_str(content: &str, delimiter: u8) -> DelimitedResult<Dataset> {
    parse_delimited(content.as_bytes(), delimiter)
}

/// Writes a header row and the given records as comma-separated text.
pub fn write_delimited<W: Write>(
    writer: W,
    columns: &[String],
    records: &[&ProteinRecord],
) -> DelimitedResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(columns)?;
    for record in records {
        writer.write_record(record.values().iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Normalizes header cells: surrounding whitespace is trimmed and blank
/// names become `Unnamed: <index>`.
pub(crate) fn column_names<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    headers
        .enumerate()
        .map(|(i, h)| {
            let h = h.trim();
            if h.is_empty() {
                format!("Unnamed: {}", i)
            } else {
                h.to_string()
            }
        })
        .collect()
}
