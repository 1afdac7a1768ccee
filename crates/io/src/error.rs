use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The file exists but could not be parsed as a workbook.
    #[error("cannot read {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },
    #[error("unsupported file format: {} (expected .xlsx, .xls, .xlsb, .ods or .csv)", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("cannot write {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },
}
