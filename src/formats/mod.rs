//! Dataset loading with format detection.
//!
//! Supports:
//! - Comma-separated text (.csv, .txt)
//! - Tab-separated text (.tsv, .tab)
//! - Spreadsheets (.xlsx, .xlsm, .xlsb, .xls, .ods)
//!
//! Format detection priority:
//! 1. Explicit format specification (-f option)
//! 2. File extension
//! 3. Content-based detection (workbook magic bytes, tabs vs commas)
//!
//! Loading never fails from the caller's point of view: [`load`] converts
//! every error into an empty dataset plus a [`LoadError`] to show the user.

pub mod delimited;
pub mod spreadsheet;

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::model::{Dataset, PROTEIN_NAME_COLUMN};
use delimited::{parse_delimited, DelimitedError};
use spreadsheet::{parse_spreadsheet, SpreadsheetError};

/// Default location of the protein table, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "Bacterial_Secretome_Database_2600.csv";

/// Message shown when the data file does not exist.
pub const NOT_FOUND_MESSAGE: &str =
    "Dataset not found! Please ensure the data file is in the same location as this application.";

/// ZIP local file header (xlsx, xlsm, xlsb, ods).
pub(crate) const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// OLE compound document header (legacy xls).
pub(crate) const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

/// Table file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Tsv,
    Spreadsheet,
}

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataFormat::Csv => write!(f, "CSV"),
            DataFormat::Tsv => write!(f, "TSV"),
            DataFormat::Spreadsheet => write!(f, "spreadsheet"),
        }
    }
}

/// Errors that can occur while loading the dataset.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound(PathBuf),

    #[error("Failed to read file: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Delimited(#[from] DelimitedError),

    #[error("{0}")]
    Spreadsheet(#[from] SpreadsheetError),

    #[error("Missing required column '{0}'")]
    MissingColumn(String),
}

impl LoadError {
    /// Returns the message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            LoadError::NotFound(_) => NOT_FOUND_MESSAGE.to_string(),
            other => format!("Error loading the dataset: {}", other),
        }
    }
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Outcome of [`load`]: always a dataset, possibly empty, plus the failure if any.
#[derive(Debug)]
pub struct LoadOutcome {
    /// Loaded dataset, empty when unavailable
    pub dataset: Arc<Dataset>,
    /// Why the dataset is unavailable
    pub error: Option<LoadError>,
}

impl LoadOutcome {
    /// Returns the user-visible error message, if loading failed.
    pub fn message(&self) -> Option<String> {
        self.error.as_ref().map(LoadError::user_message)
    }
}

/// Detects format from file extension.
pub fn detect_format_from_extension<P: AsRef<Path>>(path: P) -> Option<DataFormat> {
    let ext = path.as_ref().extension().and_then(OsStr::to_str)?;
    match ext.to_lowercase().as_str() {
        "csv" | "txt" => Some(DataFormat::Csv),
        "tsv" | "tab" => Some(DataFormat::Tsv),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(DataFormat::Spreadsheet),
        _ => None,
    }
}

/// Detects the format by examining the first bytes of the file.
pub fn detect_format_from_content(content: &[u8]) -> DataFormat {
    if content.starts_with(ZIP_MAGIC) || content.starts_with(OLE_MAGIC) {
        return DataFormat::Spreadsheet;
    }

    let first_line = content.split(|&b| b == b'\n').next().unwrap_or_default();
    if first_line.contains(&b'\t') && !first_line.contains(&b',') {
        DataFormat::Tsv
    } else {
        DataFormat::Csv
    }
}

/// Parses already-read content with a specific format.
fn parse_content(path: &Path, content: &[u8], format: DataFormat) -> LoadResult<Dataset> {
    let dataset = match format {
        DataFormat::Csv => parse_delimited(content, b',')?,
        DataFormat::Tsv => parse_delimited(content, b'\t')?,
        DataFormat::Spreadsheet => parse_spreadsheet(path, content)?,
    };

    if !dataset.has_column(PROTEIN_NAME_COLUMN) {
        return Err(LoadError::MissingColumn(PROTEIN_NAME_COLUMN.to_string()));
    }
    Ok(dataset)
}

/// Reads the dataset, returning the first failure.
///
/// Detection priority:
/// 1. Explicit format (if provided)
/// 2. File extension, falling back to content detection if that parse fails
/// 3. Content-based detection
pub fn try_load<P: AsRef<Path>>(path: P, forced_format: Option<DataFormat>) -> LoadResult<Dataset> {
    let path = path.as_ref();
    let content = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io(e),
    })?;

    if let Some(format) = forced_format {
        debug!("Using forced format {}", format);
        return parse_content(path, &content, format);
    }

    let sniffed = detect_format_from_content(&content);

    if let Some(format) = detect_format_from_extension(path) {
        match parse_content(path, &content, format) {
            Ok(dataset) => return Ok(dataset),
            Err(e) if sniffed != format => {
                debug!("Reading as {} failed ({}), retrying as {}", format, e, sniffed);
                // Workbook bytes explain the failure better than the extension does
                return parse_content(path, &content, sniffed).map_err(|retry| {
                    if sniffed == DataFormat::Spreadsheet {
                        retry
                    } else {
                        e
                    }
                });
            }
            Err(e) => return Err(e),
        }
    }

    debug!("No usable extension, detected {} from content", sniffed);
    parse_content(path, &content, sniffed)
}

/// Loads the dataset, converting any failure into an empty dataset.
///
/// Called once at startup; the returned handle is shared read-only for the
/// rest of the run.
pub fn load<P: AsRef<Path>>(path: P, forced_format: Option<DataFormat>) -> LoadOutcome {
    let path = path.as_ref();
    info!("Loading dataset from {}", path.display());

    match try_load(path, forced_format) {
        Ok(dataset) => {
            info!(
                "Loaded {} records with {} columns",
                dataset.len(),
                dataset.columns().len()
            );
            if dataset.is_empty() {
                warn!("Dataset {} has no records", path.display());
            }
            LoadOutcome {
                dataset: Arc::new(dataset),
                error: None,
            }
        }
        Err(e) => {
            warn!("Dataset unavailable: {}", e);
            LoadOutcome {
                dataset: Arc::new(Dataset::empty()),
                error: Some(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_detect_from_extension() {
        assert_eq!(detect_format_from_extension("data.csv"), Some(DataFormat::Csv));
        assert_eq!(detect_format_from_extension("data.CSV"), Some(DataFormat::Csv));
        assert_eq!(detect_format_from_extension("data.tsv"), Some(DataFormat::Tsv));
        assert_eq!(detect_format_from_extension("data.xlsx"), Some(DataFormat::Spreadsheet));
        assert_eq!(detect_format_from_extension("data.ods"), Some(DataFormat::Spreadsheet));
        assert_eq!(detect_format_from_extension("data.json"), None);
        assert_eq!(detect_format_from_extension("data"), None);
    }

    #[test]
    fn test_detect_from_content() {
        assert_eq!(detect_format_from_content(b"PK\x03\x04rest"), DataFormat::Spreadsheet);
        assert_eq!(detect_format_from_content(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1]), DataFormat::Spreadsheet);
        assert_eq!(detect_format_from_content(b"Protein Name\tLength\n"), DataFormat::Tsv);
        assert_eq!(detect_format_from_content(b"Protein Name,Length\n"), DataFormat::Csv);
        assert_eq!(detect_format_from_content(b""), DataFormat::Csv);
    }

    #[test]
    fn test_load_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "proteins.csv", b"Protein Name,Organism\nSecA,E. coli\nOmpA,E. coli\n");

        let outcome = load(&path, None);
        assert!(outcome.error.is_none());
        assert!(outcome.message().is_none());
        assert_eq!(outcome.dataset.len(), 2);
    }

    #[test]
    fn test_load_tsv_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "proteins", b"Protein Name\tOrganism\nSecA\tE. coli\n");

        let dataset = try_load(&path, None).unwrap();
        assert_eq!(dataset.get(0).unwrap().get("Organism").unwrap().to_string(), "E. coli");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = load(dir.path().join("absent.csv"), None);

        assert!(outcome.dataset.is_empty());
        assert!(matches!(outcome.error, Some(LoadError::NotFound(_))));
        assert_eq!(outcome.message().as_deref(), Some(NOT_FOUND_MESSAGE));
    }

    #[test]
    fn test_load_missing_protein_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "proteins.csv", b"Name,Organism\nSecA,E. coli\n");

        let outcome = load(&path, None);
        assert!(outcome.dataset.is_empty());
        assert!(matches!(outcome.error, Some(LoadError::MissingColumn(_))));
        assert_eq!(
            outcome.message().unwrap(),
            "Error loading the dataset: Missing required column 'Protein Name'"
        );
    }

    #[test]
    fn test_load_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "proteins.csv", b"Protein Name,Organism\n");

        let outcome = load(&path, None);
        assert!(outcome.error.is_none());
        assert!(outcome.dataset.is_empty());
    }

    #[test]
    fn test_fake_workbook_with_csv_extension() {
        let dir = tempfile::tempdir().unwrap();
        // Workbook magic but no valid archive behind it
        let path = write(&dir, "proteins.csv", b"PK\x03\x04\xff\xff\xff\xff");

        let outcome = load(&path, None);
        assert!(outcome.dataset.is_empty());
        assert!(matches!(outcome.error, Some(LoadError::Spreadsheet(_))));
        let message = outcome.message().unwrap();
        assert!(message.starts_with("Error loading the dataset: "), "{message}");
    }

    fn workbook_bytes(rows: &[(&str, Option<f64>)]) -> Vec<u8> {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Protein Name").unwrap();
        sheet.write_string(0, 1, "Length").unwrap();
        for (i, (name, length)) in rows.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_string(row, 0, *name).unwrap();
            if let Some(length) = length {
                sheet.write_number(row, 1, *length).unwrap();
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_workbook_with_csv_extension() {
        let dir = tempfile::tempdir().unwrap();
        let content = workbook_bytes(&[("SecA", Some(901.0)), ("OmpA", Some(346.0))]);
        let path = write(&dir, "Bacterial_Secretome_Database_2600.csv", &content);

        let outcome = load(&path, None);
        assert!(outcome.error.is_none(), "{:?}", outcome.error);
        let dataset = outcome.dataset;
        assert_eq!(dataset.columns(), &["Protein Name", "Length"]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get(0).unwrap().protein_name(), Some("SecA"));
        assert_eq!(dataset.get(1).unwrap().get("Length"), Some(&crate::model::Value::Number(346.0)));
    }

    #[test]
    fn test_workbook_with_xlsx_extension() {
        let dir = tempfile::tempdir().unwrap();
        let content = workbook_bytes(&[("SecA", Some(901.0)), ("Hemolysin", None)]);
        let path = write(&dir, "proteins.xlsx", &content);

        let dataset = try_load(&path, None).unwrap();
        assert_eq!(dataset.len(), 2);
        assert!(dataset.get(1).unwrap().get("Length").unwrap().is_null());
    }

    #[test]
    fn test_forced_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "proteins.dat", b"Protein Name;Organism\nSecA;E. coli\n");

        // Forced CSV keeps the whole line as a single column
        let err = try_load(&path, Some(DataFormat::Csv)).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(_)));

        let path = write(&dir, "proteins.dat", b"Protein Name\tOrganism\nSecA\tE. coli\n");
        let dataset = try_load(&path, Some(DataFormat::Tsv)).unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_unreadable_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be read as a file
        let outcome = load(dir.path(), None);
        assert!(outcome.dataset.is_empty());
        assert!(matches!(outcome.error, Some(LoadError::Io(_))));
    }
}
