// Excel import (calamine) and export (rust_xlsxwriter)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet};
use rostersync_recon::{CellKind, Sheet, Table, Workbook};

use crate::error::IoError;

/// Import an Excel file (xlsx, xls, xlsb, ods) as string cells.
///
/// Cells keep their sheet position: data that starts below or right of A1 is
/// padded with empty cells. Trailing empty cells and rows are dropped, so
/// the next free row is directly below the last non-empty one. Each cell
/// also records its [`CellKind`] so [`export`] can write it back as read.
pub fn import(path: &Path) -> Result<Workbook, IoError> {
    let corrupt = |reason: String| IoError::Corrupt { path: path.to_path_buf(), reason };

    let mut workbook: Sheets<_> =
        open_workbook_auto(path).map_err(|e| corrupt(format!("failed to open Excel file: {e}")))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(corrupt("Excel file contains no sheets".to_string()));
    }

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for sheet_name in &sheet_names {
        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| corrupt(format!("failed to read sheet '{sheet_name}': {e}")))?;

        // Range start offset (data may not begin at A1)
        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        let mut rows: Vec<Vec<(String, CellKind)>> = vec![Vec::new(); start_row as usize];

        for row in range.rows() {
            let mut cells = vec![(String::new(), CellKind::Text); start_col as usize];
            cells.extend(row.iter().map(|c| (cell_to_string(c), cell_kind(c))));
            let end = cells.iter().rposition(|(v, _)| !v.is_empty()).map_or(0, |i| i + 1);
            cells.truncate(end);
            rows.push(cells);
        }

        let end = rows.iter().rposition(|r| !r.is_empty()).map_or(0, |i| i + 1);
        rows.truncate(end);

        tracing::debug!(path = %path.display(), sheet = %sheet_name, rows = rows.len(), "imported sheet");
        let mut sheet = Sheet::new(sheet_name.clone());
        for cells in rows {
            sheet.push_typed_row(cells);
        }
        sheets.push(sheet);
    }

    Ok(Workbook::with_sheets(sheets))
}

/// Render a calamine cell the way it shows in the sheet.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => format_number(*n),
        Data::Int(n) => n.to_string(),
        // Stored as TRUE/FALSE text, the way formulas display them
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::Error(e) => e.to_string(),
        // Serial number; the lookup columns never hold dates
        Data::DateTime(dt) => format_number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

/// Integers without decimals, everything else via shortest display.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

fn cell_kind(cell: &Data) -> CellKind {
    match cell {
        Data::Float(_) | Data::Int(_) => CellKind::Number,
        Data::Bool(_) => CellKind::Bool,
        Data::DateTime(dt) if dt.is_duration() => CellKind::Number,
        Data::DateTime(_) => CellKind::Date,
        _ => CellKind::Text,
    }
}

/// Export a workbook to .xlsx, one worksheet per sheet, values only.
pub fn export(workbook: &Workbook, path: &Path) -> Result<(), IoError> {
    let write_err = |reason: String| IoError::Write { path: path.to_path_buf(), reason };

    let mut xlsx_workbook = XlsxWorkbook::new();
    for sheet in workbook.sheets() {
        let worksheet = xlsx_workbook
            .add_worksheet()
            .set_name(&sheet.name)
            .map_err(|e| write_err(format!("failed to create sheet '{}': {e}", sheet.name)))?;
        export_sheet_cells(sheet, worksheet).map_err(write_err)?;
    }

    xlsx_workbook
        .save(path)
        .map_err(|e| write_err(format!("failed to save: {e}")))?;
    tracing::debug!(path = %path.display(), sheets = workbook.sheets().len(), "exported workbook");
    Ok(())
}

fn export_sheet_cells(sheet: &Sheet, worksheet: &mut Worksheet) -> Result<(), String> {
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let datetime_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    for (row_idx, row) in sheet.rows().iter().enumerate() {
        let row32 = u32::try_from(row_idx).map_err(|_| format!("row {} out of range", row_idx + 1))?;
        for (col_idx, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let col16 = u16::try_from(col_idx).map_err(|_| format!("column {} out of range", col_idx + 1))?;
            let number = value.parse::<f64>().ok().filter(|n| n.is_finite());
            // Anything that no longer parses as its original kind goes out as text.
            let written = match (sheet.kind(row_idx, col_idx), number) {
                (CellKind::Number, Some(n)) => worksheet.write_number(row32, col16, n),
                (CellKind::Date, Some(n)) if n.fract() == 0.0 => {
                    worksheet.write_number_with_format(row32, col16, n, &date_format)
                }
                (CellKind::Date, Some(n)) => worksheet.write_number_with_format(row32, col16, n, &datetime_format),
                (CellKind::Bool, _) if value == "TRUE" || value == "FALSE" => {
                    worksheet.write_boolean(row32, col16, value == "TRUE")
                }
                _ => worksheet.write_string(row32, col16, value),
            };
            written.map_err(|e| format!("failed to write cell ({}, {}) in '{}': {e}", row_idx, col_idx, sheet.name))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn integral_floats_have_no_decimal_point() {
        assert_eq!(cell_to_string(&Data::Float(100.0)), "100");
        assert_eq!(cell_to_string(&Data::Float(12.5)), "12.5");
        assert_eq!(cell_to_string(&Data::Int(-7)), "-7");
        assert_eq!(cell_to_string(&Data::Bool(true)), "TRUE");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn errors_render_like_excel() {
        assert_eq!(cell_to_string(&Data::Error(CellErrorType::Div0)), "#DIV/0!");
        assert_eq!(cell_to_string(&Data::Error(CellErrorType::NA)), "#N/A");
    }

    #[test]
    fn kinds_from_calamine_cells() {
        assert_eq!(cell_kind(&Data::String("555".into())), CellKind::Text);
        assert_eq!(cell_kind(&Data::Float(555.0)), CellKind::Number);
        assert_eq!(cell_kind(&Data::Int(3)), CellKind::Number);
        assert_eq!(cell_kind(&Data::Bool(false)), CellKind::Bool);
        assert_eq!(cell_kind(&Data::Empty), CellKind::Text);
    }
}
