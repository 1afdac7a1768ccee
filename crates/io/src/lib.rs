//! Workbook file I/O: Excel via calamine / rust_xlsxwriter, CSV via csv.
//!
//! Everything is loaded into a [`rostersync_recon::Workbook`] of string cells.
//! Formatting and formulas are not carried over; saved files contain values.

pub mod csv;
pub mod error;
pub mod xlsx;

use std::path::Path;

use rostersync_recon::Workbook;

pub use error::IoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Excel,
    Csv,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Result<Self, IoError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(Self::Excel),
            "csv" | "tsv" | "txt" => Ok(Self::Csv),
            _ => Err(IoError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Open a workbook. A CSV file becomes a single sheet named `csv_sheet`.
pub fn open(path: &Path, csv_sheet: &str) -> Result<Workbook, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    match FileFormat::from_path(path)? {
        FileFormat::Excel => xlsx::import(path),
        FileFormat::Csv => csv::import(path, csv_sheet),
    }
}

/// Save a workbook. CSV output holds only the sheet named `csv_sheet`.
pub fn save(workbook: &Workbook, path: &Path, csv_sheet: &str) -> Result<(), IoError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "xlsx" => xlsx::export(workbook, path),
        "csv" => {
            let sheet = workbook.sheet(csv_sheet).map_err(|e| IoError::Write {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            csv::export(sheet, path)
        }
        _ => Err(IoError::UnsupportedFormat(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn format_from_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a.XLSX")).unwrap(), FileFormat::Excel);
        assert_eq!(FileFormat::from_path(Path::new("a.ods")).unwrap(), FileFormat::Excel);
        assert_eq!(FileFormat::from_path(Path::new("a.csv")).unwrap(), FileFormat::Csv);
        assert!(FileFormat::from_path(Path::new("a.pdf")).is_err());
        assert!(FileFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn open_missing_file() {
        let err = open(Path::new("/definitely/not/here.xlsx"), "Sheet1").unwrap_err();
        assert!(matches!(err, IoError::NotFound(ref p) if p == &PathBuf::from("/definitely/not/here.xlsx")));
    }

    #[test]
    fn save_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let err = save(&Workbook::new(), &dir.path().join("out.xls"), "vlookup").unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }
}
