//! `rostersync-recon`: roster-to-lookup reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded workbooks, mutates the target in
//! memory, returns what it decided. No CLI or file I/O dependencies.

pub mod config;
pub mod dedupe;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod merge;
pub mod model;
pub mod roster;
pub mod sheet;
pub mod workbook;
pub mod worklist;

pub use config::SyncConfig;
pub use engine::{run, RunOptions, WorkListSource};
pub use error::{ErrorKind, ReconError};
pub use model::{SyncOutcome, ValidationReport};
pub use roster::AuthoritativeIndex;
pub use sheet::{CellKind, Sheet, Table};
pub use workbook::Workbook;
