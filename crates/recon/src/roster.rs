//! Authoritative identifier → supervisor index built from the master roster.

use std::collections::BTreeMap;

use crate::config::MasterColumns;
use crate::error::ReconError;
use crate::matcher::find_header;
use crate::model::SupervisorRecord;
use crate::sheet::{cell, Table};

/// Read-only map from identifier to roster entry.
///
/// Iteration is ordered by identifier so upserting every entry produces the
/// same rows in the same order on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthoritativeIndex {
    records: BTreeMap<String, SupervisorRecord>,
}

impl AuthoritativeIndex {
    pub fn get(&self, identifier: &str) -> Option<&SupervisorRecord> {
        self.records.get(identifier)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SupervisorRecord> {
        self.records.values()
    }
}

impl FromIterator<SupervisorRecord> for AuthoritativeIndex {
    fn from_iter<I: IntoIterator<Item = SupervisorRecord>>(iter: I) -> Self {
        let records = iter.into_iter().map(|r| (r.identifier.clone(), r)).collect();
        Self { records }
    }
}

/// Build the index from the master sheet.
///
/// Blank-identifier rows are skipped. A repeated identifier silently replaces
/// the earlier entry: the roster is taken as already deduplicated.
pub fn build_index(
    table_name: &str,
    master: &impl Table,
    columns: &MasterColumns,
) -> Result<AuthoritativeIndex, ReconError> {
    let rows = master.rows();
    let (header_idx, cols) = find_header(table_name, rows, &columns.fields(), columns.header_scan_rows)?;
    let (id_col, first_col, last_col, manager_col) = (cols.at(0), cols.at(1), cols.at(2), cols.at(3));

    let mut records = BTreeMap::new();
    for row in &rows[header_idx + 1..] {
        let identifier = cell(row, id_col);
        if identifier.is_empty() {
            continue;
        }

        let display_name = format!("{} {}", cell(row, first_col), cell(row, last_col))
            .trim()
            .to_string();

        records.insert(
            identifier.to_string(),
            SupervisorRecord {
                identifier: identifier.to_string(),
                display_name,
                supervisor_name: cell(row, manager_col).to_string(),
            },
        );
    }

    tracing::debug!(table = table_name, records = records.len(), "built authoritative index");
    Ok(AuthoritativeIndex { records })
}
