//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract. Scheduled jobs rely on them.
//!
//! | Code | Meaning                                                        |
//! |------|----------------------------------------------------------------|
//! | 0    | Success (missing-in-master warnings still exit 0)              |
//! | 1    | General error (unspecified)                                    |
//! | 2    | Usage error (bad or missing flags, output path == target path) |
//! | 3    | Configuration error (bad config, missing sheet or column)      |
//! | 4    | Data integrity error (conflicting or duplicate identifiers)    |
//! | 5    | I/O error (cannot open, parse or save a workbook)              |

use rostersync_io::IoError;
use rostersync_recon::{ErrorKind, ReconError};

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
/// clap uses the same code for its own argument errors.
pub const EXIT_USAGE: u8 = 2;

/// Config file invalid, required sheet or column missing, header not found.
pub const EXIT_CONFIG: u8 = 3;

/// Lookup table contradicts itself; operator must fix the source file.
pub const EXIT_DATA_INTEGRITY: u8 = 4;

/// Workbook could not be opened, parsed or saved.
pub const EXIT_IO: u8 = 5;

/// Map an engine error to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err.kind() {
        ErrorKind::Configuration => EXIT_CONFIG,
        ErrorKind::DataIntegrity => EXIT_DATA_INTEGRITY,
    }
}

/// Map a file error to its exit code.
pub fn io_exit_code(err: &IoError) -> u8 {
    match err {
        IoError::UnsupportedFormat(_) => EXIT_USAGE,
        IoError::NotFound(_) | IoError::Corrupt { .. } | IoError::Write { .. } => EXIT_IO,
    }
}
