//! Fuzzy header matching.
//!
//! Export tools rename columns freely ("Colleague ID", "colleague_id",
//! "Colleague ID (HR)"), so headers are compared after normalization and a
//! containment check instead of by exact text.

use serde::Serialize;

use crate::error::ReconError;

/// Lowercase ASCII letters and digits only. Non-breaking spaces are treated
/// as ordinary spaces before trimming.
pub fn normalize(s: &str) -> String {
    s.replace('\u{00A0}', " ")
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Equal, or either contains the other, after normalization.
/// A value that normalizes to nothing never matches.
pub fn fuzzy_match(a: &str, b: &str) -> bool {
    normalized_match(&normalize(a), &normalize(b))
}

fn normalized_match(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a == b || a.contains(b) || b.contains(a)
}

/// Logical field name → zero-based column index, in the order requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMapping {
    bindings: Vec<(String, usize)>,
}

impl ColumnMapping {
    /// Column bound to `field`, by its logical name.
    pub fn column(&self, field: &str) -> Option<usize> {
        self.bindings.iter().find(|(f, _)| f == field).map(|(_, c)| *c)
    }

    /// Column bound to the `pos`-th requested field.
    pub fn at(&self, pos: usize) -> usize {
        self.bindings[pos].1
    }

    pub fn indexes(&self) -> Vec<usize> {
        self.bindings.iter().map(|(_, c)| *c).collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Bind every wanted field to one column of `header`.
///
/// Columns are scanned left to right; each column binds the first still
/// unresolved field it matches, so earlier columns win and no column is
/// bound twice. Any field left unbound is a [`ReconError::MissingColumn`].
pub fn resolve_columns(
    table: &str,
    header: &[String],
    wanted: &[&str],
) -> Result<ColumnMapping, ReconError> {
    let wanted_norm: Vec<String> = wanted.iter().map(|w| normalize(w)).collect();
    let mut slots: Vec<Option<usize>> = vec![None; wanted.len()];

    for (col, text) in header.iter().enumerate() {
        let have = normalize(text);
        if let Some(j) = (0..wanted.len())
            .find(|&j| slots[j].is_none() && normalized_match(&have, &wanted_norm[j]))
        {
            slots[j] = Some(col);
        }
    }

    let mut bindings = Vec::with_capacity(wanted.len());
    for (field, slot) in wanted.iter().zip(slots) {
        match slot {
            Some(col) => bindings.push((field.to_string(), col)),
            None => {
                return Err(ReconError::MissingColumn {
                    table: table.to_string(),
                    field: field.to_string(),
                })
            }
        }
    }

    tracing::debug!(table, columns = ?bindings, "resolved columns");
    Ok(ColumnMapping { bindings })
}

/// Find the header row among the first `scan_rows` rows.
///
/// A row qualifies when at least `wanted.len() - 1` of its cells match some
/// wanted field. [`resolve_columns`] still requires every field once the
/// row is chosen. `scan_rows == 0` means the first row is always the header.
pub fn locate_header_row(
    table: &str,
    rows: &[Vec<String>],
    wanted: &[&str],
    scan_rows: usize,
) -> Result<usize, ReconError> {
    if rows.is_empty() {
        return Err(ReconError::EmptyTable { table: table.to_string() });
    }
    if scan_rows == 0 {
        return Ok(0);
    }

    let wanted_norm: Vec<String> = wanted.iter().map(|w| normalize(w)).collect();
    let threshold = wanted.len().saturating_sub(1);
    let limit = scan_rows.min(rows.len());

    for (i, row) in rows.iter().take(limit).enumerate() {
        let hits = row
            .iter()
            .map(|c| normalize(c))
            .filter(|c| wanted_norm.iter().any(|w| normalized_match(c, w)))
            .count();
        if hits >= threshold {
            tracing::debug!(table, row = i + 1, hits, "located header row");
            return Ok(i);
        }
    }

    Err(ReconError::HeaderNotFound { table: table.to_string(), scanned: limit })
}

/// Locate the header row, then bind columns strictly against it.
/// Returns the zero-based header row index and the mapping.
pub fn find_header(
    table: &str,
    rows: &[Vec<String>],
    wanted: &[&str],
    scan_rows: usize,
) -> Result<(usize, ColumnMapping), ReconError> {
    let header_idx = locate_header_row(table, rows, wanted, scan_rows)?;
    let mapping = resolve_columns(table, &rows[header_idx], wanted)?;
    Ok((header_idx, mapping))
}
