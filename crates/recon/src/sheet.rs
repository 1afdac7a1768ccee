//! In-memory sheet model and the `Table` seam the engine mutates through.
//!
//! Row numbers passed to [`Table`] methods are 1-based, matching the way
//! spreadsheet users (and error messages) address rows. Row 1 is the first
//! physical row, usually the header.

/// A tabular sheet of string cells.
///
/// The reconciliation passes only ever need these four operations, so file
/// formats can back a table however they like.
pub trait Table {
    /// All physical rows, top to bottom. Rows may have different lengths.
    fn rows(&self) -> &[Vec<String>];

    /// Write `value` at zero-based `col` of 1-based `row_number`.
    /// Writing past the last row or column grows the table with empty cells.
    fn set_cell(&mut self, col: usize, row_number: usize, value: &str);

    /// Physically remove 1-based `row_number`; rows below shift up by one.
    /// Removing a row that does not exist is a no-op.
    fn remove_row(&mut self, row_number: usize);

    fn row_count(&self) -> usize {
        self.rows().len()
    }
}

/// Trimmed cell value at `idx`, or `""` when the row is shorter.
pub fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|s| s.trim()).unwrap_or("")
}

/// What a cell held in the file it was read from.
///
/// The engine only sees strings; writers use the kind to put numbers,
/// dates and booleans back as they were. Cells written through
/// [`Table::set_cell`] are always [`CellKind::Text`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellKind {
    #[default]
    Text,
    Number,
    /// Excel serial date; the string is the serial number.
    Date,
    Bool,
}

/// A named grid of string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    rows: Vec<Vec<String>>,
    /// Parallel to `rows`; missing entries are `Text`.
    kinds: Vec<Vec<CellKind>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), rows: Vec::new(), kinds: Vec::new() }
    }

    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self { name: name.into(), rows, kinds: Vec::new() }
    }

    /// Convenience for tests and fixtures: build from string slices.
    pub fn from_strs(name: impl Into<String>, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        Self::from_rows(name, rows)
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Append a row read from a typed source.
    pub fn push_typed_row(&mut self, cells: Vec<(String, CellKind)>) {
        self.kinds.resize_with(self.rows.len(), Vec::new);
        let (values, kinds): (Vec<String>, Vec<CellKind>) = cells.into_iter().unzip();
        self.rows.push(values);
        self.kinds.push(kinds);
    }

    /// Kind of the cell at zero-based `row_idx`, `col`.
    pub fn kind(&self, row_idx: usize, col: usize) -> CellKind {
        self.kinds
            .get(row_idx)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or_default()
    }

    /// Rows with trailing blank rows dropped. Used by writers.
    pub fn trimmed_rows(&self) -> &[Vec<String>] {
        let end = self
            .rows
            .iter()
            .rposition(|r| r.iter().any(|c| !c.is_empty()))
            .map_or(0, |i| i + 1);
        &self.rows[..end]
    }
}

impl Table for Sheet {
    fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    fn set_cell(&mut self, col: usize, row_number: usize, value: &str) {
        debug_assert!(row_number >= 1, "row numbers are 1-based");
        let idx = row_number.saturating_sub(1);
        if self.rows.len() <= idx {
            self.rows.resize_with(idx + 1, Vec::new);
        }
        let row = &mut self.rows[idx];
        if row.len() <= col {
            row.resize(col + 1, String::new());
        }
        row[col] = value.to_string();
        if let Some(kind) = self.kinds.get_mut(idx).and_then(|r| r.get_mut(col)) {
            *kind = CellKind::Text;
        }
    }

    fn remove_row(&mut self, row_number: usize) {
        if row_number >= 1 && row_number <= self.rows.len() {
            self.rows.remove(row_number - 1);
            if row_number <= self.kinds.len() {
                self.kinds.remove(row_number - 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_cell_grows_rows_and_columns() {
        let mut sheet = Sheet::from_strs("s", &[&["a"]]);
        sheet.set_cell(2, 3, "x");
        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.rows()[2], vec!["", "", "x"]);
        assert!(sheet.rows()[1].is_empty());
    }

    #[test]
    fn remove_row_shifts_up() {
        let mut sheet = Sheet::from_strs("s", &[&["h"], &["1"], &["2"], &["3"]]);
        sheet.remove_row(2);
        assert_eq!(sheet.rows(), &[vec!["h"], vec!["2"], vec!["3"]]);
        sheet.remove_row(10);
        sheet.remove_row(0);
        assert_eq!(sheet.row_count(), 3);
    }

    #[test]
    fn kinds_follow_rows_and_reset_on_write() {
        let mut sheet = Sheet::new("Data");
        sheet.push_row(vec!["Date".into(), "Driver ID".into()]);
        sheet.push_typed_row(vec![("45000".into(), CellKind::Date), ("555".into(), CellKind::Text)]);
        sheet.push_typed_row(vec![("46000".into(), CellKind::Date), ("12".into(), CellKind::Number)]);

        assert_eq!(sheet.kind(0, 0), CellKind::Text);
        assert_eq!(sheet.kind(1, 0), CellKind::Date);
        assert_eq!(sheet.kind(2, 1), CellKind::Number);
        assert_eq!(sheet.kind(9, 9), CellKind::Text);

        sheet.remove_row(2);
        assert_eq!(sheet.kind(1, 0), CellKind::Date);
        assert_eq!(sheet.kind(1, 1), CellKind::Number);
        assert_eq!(sheet.rows()[1], vec!["46000", "12"]);

        sheet.set_cell(1, 2, "13");
        assert_eq!(sheet.kind(1, 1), CellKind::Text);
        assert_eq!(sheet.kind(1, 0), CellKind::Date);
    }

    #[test]
    fn cell_trims_and_defaults() {
        let row = vec!["  100 ".to_string()];
        assert_eq!(cell(&row, 0), "100");
        assert_eq!(cell(&row, 5), "");
    }

    #[test]
    fn trimmed_rows_drops_trailing_blanks() {
        let sheet = Sheet::from_strs("s", &[&["h"], &[""], &["x"], &["", ""], &[]]);
        assert_eq!(sheet.trimmed_rows().len(), 3);
        assert!(Sheet::new("empty").trimmed_rows().is_empty());
    }
}
