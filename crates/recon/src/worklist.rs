//! Work-list extraction from the data sheet.
//!
//! Repeats here are expected (one row per shift, several shifts per driver),
//! so they are logged and skipped rather than treated as errors.

use std::collections::HashSet;

use crate::error::ReconError;
use crate::matcher::resolve_columns;
use crate::model::{SkippedDuplicate, WorkList};
use crate::sheet::{cell, Table};

/// Unique identifiers from `source` in first-seen order. Row 1 is the header.
pub fn extract_work_list(
    table_name: &str,
    source: &impl Table,
    identifier_field: &str,
) -> Result<WorkList, ReconError> {
    let rows = source.rows();
    let header = rows
        .first()
        .ok_or_else(|| ReconError::EmptyTable { table: table_name.to_string() })?;
    let id_col = resolve_columns(table_name, header, &[identifier_field])?.at(0);

    let mut seen: HashSet<&str> = HashSet::new();
    let mut list = WorkList::default();

    for (i, row) in rows.iter().enumerate().skip(1) {
        let id = cell(row, id_col);
        if id.is_empty() {
            continue;
        }
        if !seen.insert(id) {
            let row_number = i + 1;
            tracing::warn!(table = table_name, id, row = row_number, "duplicate identifier ignored");
            list.skipped.push(SkippedDuplicate { identifier: id.to_string(), row: row_number });
            continue;
        }
        list.ids.push(id.to_string());
    }

    Ok(list)
}
