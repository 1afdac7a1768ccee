use thiserror::Error;

/// Broad class of a [`ReconError`], used by callers to pick an exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad config, missing column, missing sheet. Nothing about the data itself.
    Configuration,
    /// The target data contradicts itself (same identifier, different names).
    DataIntegrity,
}

#[derive(Debug, Error)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),
    /// Config validation error (empty field name, empty sheet name).
    #[error("config validation error: {0}")]
    ConfigValidation(String),
    /// A required logical field has no matching column in the header row.
    #[error("{table}: missing required column '{field}'")]
    MissingColumn { table: String, field: String },
    /// Lenient header discovery found no row matching enough required fields.
    #[error("{table}: no header row found in the first {scanned} row(s)")]
    HeaderNotFound { table: String, scanned: usize },
    /// The table has no rows at all, not even a header.
    #[error("{table}: table is empty, expected a header row")]
    EmptyTable { table: String },
    /// Named sheet does not exist in the workbook.
    #[error("no such sheet: '{0}'")]
    NoSuchSheet(String),
    /// Same identifier appears twice in the lookup table with different names.
    #[error(
        "conflicting name for identifier {id}: '{first}' (row {first_row}) vs '{second}' (row {second_row})"
    )]
    ConflictingName {
        id: String,
        first: String,
        second: String,
        first_row: usize,
        second_row: usize,
    },
    /// Duplicate identifier still present when the merge pre-pass runs.
    #[error("duplicate identifier found in lookup table: {id} (rows {first_row} and {second_row})")]
    DuplicateIdentifier {
        id: String,
        first_row: usize,
        second_row: usize,
    },
}

impl ReconError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConflictingName { .. } | Self::DuplicateIdentifier { .. } => ErrorKind::DataIntegrity,
            _ => ErrorKind::Configuration,
        }
    }
}
