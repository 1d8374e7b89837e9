//! Spreadsheet reader (xlsx, xlsm, xlsb, xls, ods).
//!
//! Only the first worksheet is read. Its first row holds the column names.
//! The workbook kind comes from the file extension when it names one, and
//! from the leading magic bytes otherwise, so a workbook saved under a
//! `.csv` name still opens.

use std::ffi::OsStr;
use std::io::Cursor;
use std::path::Path;

use calamine::{DataType, Ods, Reader, Sheets, Xls, Xlsb, Xlsx};
use thiserror::Error;

use crate::formats::delimited::column_names;
use crate::formats::{OLE_MAGIC, ZIP_MAGIC};
use crate::model::{is_missing, Dataset, Value};

/// Errors that can occur while reading a workbook.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    #[error("{0}")]
    Workbook(#[from] calamine::Error),

    #[error("Not a spreadsheet file")]
    NotAWorkbook,

    #[error("Workbook has no worksheet")]
    NoWorksheet,

    #[error("Worksheet is empty (no header row)")]
    EmptySheet,
}

/// Result type for spreadsheet operations.
pub type SpreadsheetResult<T> = Result<T, SpreadsheetError>;

type Workbook = Sheets<Cursor<Vec<u8>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkbookKind {
    Xlsx,
    Xlsb,
    Xls,
    Ods,
}

/// Candidate workbook kinds for a file, most likely first.
fn candidate_kinds(path: &Path, content: &[u8]) -> Vec<WorkbookKind> {
    let ext = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_lowercase);
    match ext.as_deref() {
        Some("xlsx" | "xlsm" | "xlam") => return vec![WorkbookKind::Xlsx],
        Some("xlsb") => return vec![WorkbookKind::Xlsb],
        Some("xls" | "xla") => return vec![WorkbookKind::Xls],
        Some("ods") => return vec![WorkbookKind::Ods],
        _ => {}
    }

    if content.starts_with(ZIP_MAGIC) {
        vec![WorkbookKind::Xlsx, WorkbookKind::Xlsb, WorkbookKind::Ods]
    } else if content.starts_with(OLE_MAGIC) {
        vec![WorkbookKind::Xls]
    } else {
        Vec::new()
    }
}

fn open_workbook(kind: WorkbookKind, content: &[u8]) -> Result<Workbook, calamine::Error> {
    let cursor = Cursor::new(content.to_vec());
    Ok(match kind {
        WorkbookKind::Xlsx => Sheets::Xlsx(Xlsx::new(cursor)?),
        WorkbookKind::Xlsb => Sheets::Xlsb(Xlsb::new(cursor)?),
        WorkbookKind::Xls => Sheets::Xls(Xls::new(cursor)?),
        WorkbookKind::Ods => Sheets::Ods(Ods::new(cursor)?),
    })
}

/// Renders a cell as text, for headers and non-numeric cells.
fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Empty => String::new(),
        DataType::Bool(b) => b.to_string(),
        DataType::Error(e) => format!("ERR({e:?})"),
        DataType::Float(n) | DataType::Duration(n) => n.to_string(),
        DataType::Int(i) => i.to_string(),
        DataType::DateTime(f) => f.to_string(),
        DataType::DateTimeIso(s) | DataType::DurationIso(s) => s.clone(),
    }
}

/// Converts a workbook cell to a table value.
fn cell_to_value(cell: &DataType) -> Value {
    match cell {
        DataType::Empty => Value::Null,
        DataType::String(s) if is_missing(s) => Value::Null,
        DataType::String(s) => Value::Text(s.clone()),
        DataType::Int(i) => Value::Number(*i as f64),
        DataType::Float(n) => Value::Number(*n),
        other => Value::Text(cell_to_string(other)),
    }
}

/// Reads the first worksheet of a workbook whose bytes are `content`.
pub fn parse_spreadsheet(path: &Path, content: &[u8]) -> SpreadsheetResult<Dataset> {
    let mut first_error = None;
    let mut workbook = None;
    for kind in candidate_kinds(path, content) {
        match open_workbook(kind, content) {
            Ok(wb) => {
                workbook = Some(wb);
                break;
            }
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }
    let mut workbook = match (workbook, first_error) {
        (Some(wb), _) => wb,
        (None, Some(e)) => return Err(e.into()),
        (None, None) => return Err(SpreadsheetError::NotAWorkbook),
    };

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SpreadsheetError::NoWorksheet)??;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .ok_or(SpreadsheetError::EmptySheet)?
        .iter()
        .map(cell_to_string)
        .collect();
    if header.iter().all(|h| h.trim().is_empty()) {
        return Err(SpreadsheetError::EmptySheet);
    }
    let columns = column_names(header.iter().map(String::as_str));

    let rows = rows
        .map(|row| row.iter().map(cell_to_value).collect())
        .collect();

    Ok(Dataset::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_values() {
        assert_eq!(cell_to_value(&DataType::Empty), Value::Null);
        assert_eq!(cell_to_value(&DataType::String("  ".into())), Value::Null);
        assert_eq!(cell_to_value(&DataType::String("N/A".into())), Value::Null);
        assert_eq!(cell_to_value(&DataType::Int(7)), Value::Number(7.0));
        assert_eq!(cell_to_value(&DataType::Float(2.5)), Value::Number(2.5));
        assert_eq!(cell_to_value(&DataType::String("SecA".into())), Value::Text("SecA".into()));
        assert_eq!(cell_to_value(&DataType::Bool(true)), Value::Text("true".into()));
    }

    #[test]
    fn test_candidate_kinds() {
        let zip = b"PK\x03\x04....";
        assert_eq!(candidate_kinds(Path::new("a.xlsx"), b""), vec![WorkbookKind::Xlsx]);
        assert_eq!(candidate_kinds(Path::new("a.ODS"), b""), vec![WorkbookKind::Ods]);
        assert_eq!(
            candidate_kinds(Path::new("a.csv"), zip),
            vec![WorkbookKind::Xlsx, WorkbookKind::Xlsb, WorkbookKind::Ods]
        );
        assert_eq!(candidate_kinds(Path::new("a.csv"), &[0xD0, 0xCF, 0x11, 0xE0]), vec![WorkbookKind::Xls]);
        assert!(candidate_kinds(Path::new("a.csv"), b"Protein Name\n").is_empty());
    }

    #[test]
    fn test_not_a_workbook() {
        let content = b"Protein Name\nSecA\n";
        assert!(matches!(
            parse_spreadsheet(Path::new("proteins.xlsx"), content),
            Err(SpreadsheetError::Workbook(_))
        ));
        assert!(matches!(
            parse_spreadsheet(Path::new("proteins.txt"), content),
            Err(SpreadsheetError::NotAWorkbook)
        ));
    }

    #[test]
    fn test_parse_workbook_from_magic() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Protein Name").unwrap();
        sheet.write_string(0, 2, "Organism").unwrap();
        sheet.write_string(1, 0, "SecA").unwrap();
        sheet.write_number(1, 1, 901).unwrap();
        sheet.write_boolean(1, 2, true).unwrap();
        let content = workbook.save_to_buffer().unwrap();

        // No workbook extension: the kind comes from the ZIP header
        let dataset = parse_spreadsheet(Path::new("proteins.dat"), &content).unwrap();
        assert_eq!(dataset.columns(), &["Protein Name", "Unnamed: 1", "Organism"]);
        let record = dataset.get(0).unwrap();
        assert_eq!(record.protein_name(), Some("SecA"));
        assert_eq!(record.values()[1], Value::Number(901.0));
        assert_eq!(record.get("Organism"), Some(&Value::Text("true".into())));
    }
}
