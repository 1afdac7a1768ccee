//! Upsert authoritative supervisor data into the lookup table.

use std::collections::HashMap;

use crate::config::LookupColumns;
use crate::error::ReconError;
use crate::matcher::resolve_columns;
use crate::model::{MergeOutcome, SupervisorRecord};
use crate::roster::AuthoritativeIndex;
use crate::sheet::{cell, Table};

/// Which identifiers to reconcile.
#[derive(Debug, Clone, Copy)]
pub enum MergeMode<'a> {
    /// Only these identifiers; ones absent from the index are reported.
    WorkList(&'a [String]),
    /// Every identifier in the index.
    AllAuthoritative,
}

impl MergeMode<'_> {
    pub fn label(&self) -> &'static str {
        match self {
            Self::WorkList(_) => "work_list",
            Self::AllAuthoritative => "all_authoritative",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions<'a> {
    /// Decide and count everything, write nothing.
    pub dry_run: bool,
    /// 1-based rows a dry-run cleanup planned but left in place.
    /// The consistency pre-pass treats them as already gone.
    pub pending_removal: &'a [usize],
}

/// Column positions for the three lookup fields.
struct LookupLayout {
    name: usize,
    id: usize,
    supervisor: usize,
}

struct Upserter {
    layout: LookupLayout,
    existing: HashMap<String, usize>,
    /// Next free 1-based row; advances per append so appends never collide.
    next_row: usize,
    dry_run: bool,
}

impl Upserter {
    fn upsert(&mut self, lookup: &mut impl Table, record: &SupervisorRecord, outcome: &mut MergeOutcome) {
        if let Some(&row) = self.existing.get(&record.identifier) {
            if !self.dry_run {
                lookup.set_cell(self.layout.supervisor, row, &record.supervisor_name);
            }
            outcome.updated += 1;
            return;
        }

        let row = self.next_row;
        if !self.dry_run {
            lookup.set_cell(self.layout.name, row, &record.display_name);
            lookup.set_cell(self.layout.id, row, &record.identifier);
            lookup.set_cell(self.layout.supervisor, row, &record.supervisor_name);
        }
        self.existing.insert(record.identifier.clone(), row);
        self.next_row += 1;
        outcome.appended += 1;
    }
}

/// Merge `index` into `lookup` per `mode`.
///
/// Existing rows get only their supervisor cell overwritten; missing rows are
/// appended after the last row. Identifiers not in the index go to the
/// returned report and leave the table untouched.
pub fn reconcile(
    table_name: &str,
    lookup: &mut impl Table,
    columns: &LookupColumns,
    index: &AuthoritativeIndex,
    mode: MergeMode<'_>,
    options: MergeOptions<'_>,
) -> Result<MergeOutcome, ReconError> {
    let (layout, existing) = scan_existing(table_name, &*lookup, columns, options.pending_removal)?;
    let mut upserter = Upserter {
        layout,
        existing,
        next_row: lookup.row_count() + 1,
        dry_run: options.dry_run,
    };
    let mut outcome = MergeOutcome::default();

    match mode {
        MergeMode::WorkList(ids) => {
            for id in ids {
                match index.get(id) {
                    Some(record) => upserter.upsert(&mut *lookup, record, &mut outcome),
                    None => outcome.report.missing_in_authority.push(id.clone()),
                }
            }
        }
        MergeMode::AllAuthoritative => {
            for record in index.iter() {
                upserter.upsert(&mut *lookup, record, &mut outcome);
            }
        }
    }

    tracing::info!(
        table = table_name,
        mode = mode.label(),
        updated = outcome.updated,
        appended = outcome.appended,
        missing = outcome.report.missing_in_authority.len(),
        dry_run = options.dry_run,
        "merge complete"
    );
    Ok(outcome)
}

/// Resolve lookup columns and map identifier → row number.
/// Any duplicate at this point means cleanup did not run or did not finish.
fn scan_existing(
    table_name: &str,
    lookup: &impl Table,
    columns: &LookupColumns,
    pending_removal: &[usize],
) -> Result<(LookupLayout, HashMap<String, usize>), ReconError> {
    let rows = lookup.rows();
    let header = rows
        .first()
        .ok_or_else(|| ReconError::EmptyTable { table: table_name.to_string() })?;
    let wanted = [
        columns.driver_name.as_str(),
        columns.driver_number.as_str(),
        columns.supervisor.as_str(),
    ];
    let cols = resolve_columns(table_name, header, &wanted)?;
    let layout = LookupLayout { name: cols.at(0), id: cols.at(1), supervisor: cols.at(2) };

    let mut existing: HashMap<String, usize> = HashMap::new();
    for (i, row) in rows.iter().enumerate().skip(1) {
        let row_number = i + 1;
        if pending_removal.contains(&row_number) {
            continue;
        }
        let id = cell(row, layout.id);
        if id.is_empty() {
            continue;
        }
        if let Some(&first_row) = existing.get(id) {
            return Err(ReconError::DuplicateIdentifier {
                id: id.to_string(),
                first_row,
                second_row: row_number,
            });
        }
        existing.insert(id.to_string(), row_number);
    }

    Ok((layout, existing))
}
