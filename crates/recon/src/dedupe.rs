//! Lookup-table duplicate cleanup, run before the merge.
//!
//! A repeated identifier with the same name is redundant and removed. A
//! repeated identifier with a different name is a data error the operator
//! has to fix by hand; nothing is removed in that case.

use std::collections::HashMap;

use crate::config::LookupColumns;
use crate::error::ReconError;
use crate::matcher::resolve_columns;
use crate::model::{CleanupOutcome, CleanupPlan};
use crate::sheet::{cell, Table};

/// Scan the lookup table and decide which rows are safe duplicates.
/// Does not touch the table.
pub fn plan_cleanup(
    table_name: &str,
    lookup: &impl Table,
    columns: &LookupColumns,
) -> Result<CleanupPlan, ReconError> {
    let rows = lookup.rows();
    let header = rows
        .first()
        .ok_or_else(|| ReconError::EmptyTable { table: table_name.to_string() })?;
    let wanted = [columns.driver_name.as_str(), columns.driver_number.as_str()];
    let cols = resolve_columns(table_name, header, &wanted)?;
    let (name_col, id_col) = (cols.at(0), cols.at(1));

    // identifier -> (first-seen name, first-seen row number)
    let mut seen: HashMap<&str, (&str, usize)> = HashMap::new();
    let mut rows_to_remove = Vec::new();

    for (i, row) in rows.iter().enumerate().skip(1) {
        let row_number = i + 1;
        let id = cell(row, id_col);
        if id.is_empty() {
            continue;
        }
        let name = cell(row, name_col);

        match seen.get(id) {
            Some(&(first_name, _)) if first_name == name => rows_to_remove.push(row_number),
            Some(&(first_name, first_row)) => {
                return Err(ReconError::ConflictingName {
                    id: id.to_string(),
                    first: first_name.to_string(),
                    second: name.to_string(),
                    first_row,
                    second_row: row_number,
                });
            }
            None => {
                seen.insert(id, (name, row_number));
            }
        }
    }

    rows_to_remove.reverse();
    Ok(CleanupPlan { rows_to_remove })
}

/// Remove planned rows, bottom-up. Returns the number removed (zero in dry run).
pub fn apply_cleanup(lookup: &mut impl Table, plan: &CleanupPlan, dry_run: bool) -> usize {
    if dry_run {
        return 0;
    }
    debug_assert!(plan.rows_to_remove.windows(2).all(|w| w[0] > w[1]));
    for &row_number in &plan.rows_to_remove {
        lookup.remove_row(row_number);
    }
    plan.len()
}

/// Plan and apply duplicate cleanup in one step.
pub fn resolve_duplicates(
    table_name: &str,
    lookup: &mut impl Table,
    columns: &LookupColumns,
    dry_run: bool,
) -> Result<CleanupOutcome, ReconError> {
    let plan = plan_cleanup(table_name, &*lookup, columns)?;
    let removed = apply_cleanup(lookup, &plan, dry_run);

    if !plan.is_empty() {
        if dry_run {
            tracing::info!(table = table_name, count = plan.len(), "cleanup: would remove duplicate rows");
        } else {
            tracing::info!(table = table_name, count = removed, "cleanup: removed duplicate rows");
        }
    }

    Ok(CleanupOutcome { plan, removed })
}
