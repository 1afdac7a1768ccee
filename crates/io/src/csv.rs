// CSV/TSV import/export

use std::io::Read;
use std::path::Path;

use rostersync_recon::{Sheet, Workbook};

use crate::error::IoError;

/// Import a delimited file as a one-sheet workbook.
pub fn import(path: &Path, sheet_name: &str) -> Result<Workbook, IoError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    let sheet = import_from_string(&content, delimiter, sheet_name).map_err(|reason| IoError::Corrupt {
        path: path.to_path_buf(),
        reason,
    })?;
    tracing::debug!(path = %path.display(), rows = sheet.trimmed_rows().len(), "imported csv");
    Ok(Workbook::with_sheets(vec![sheet]))
}

/// Pick the delimiter that splits the leading lines most consistently.
///
/// Each candidate scores `lines agreeing with line 1 * fields in line 1`;
/// a candidate that leaves line 1 whole never wins. Falls back to comma.
fn sniff_delimiter(content: &str) -> u8 {
    const CANDIDATES: [u8; 4] = [b'\t', b';', b',', b'|'];
    let sample: Vec<&str> = content.lines().take(10).collect();

    let field_count = |line: &str, delim: u8| -> usize {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delim)
            .has_headers(false)
            .flexible(true)
            .from_reader(line.as_bytes());
        match reader.records().next() {
            Some(Ok(record)) => record.len(),
            _ => 1,
        }
    };

    let mut best = (0usize, b',');
    for delim in CANDIDATES {
        let Some(first) = sample.first().map(|line| field_count(*line, delim)) else {
            break;
        };
        if first < 2 {
            continue;
        }
        let agreeing = sample.iter().filter(|line| field_count(**line, delim) == first).count();
        let score = agreeing * first;
        if score > best.0 {
            best = (score, delim);
        }
    }
    best.1
}

/// Read file and convert to UTF-8 if needed (Excel-exported CSVs are often Windows-1252)
fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let corrupt = |e: std::io::Error| IoError::Corrupt { path: path.to_path_buf(), reason: e.to_string() };
    let mut file = std::fs::File::open(path).map_err(corrupt)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(corrupt)?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s.strip_prefix('\u{FEFF}').map(str::to_string).unwrap_or(s)),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

fn import_from_string(content: &str, delimiter: u8, sheet_name: &str) -> Result<Sheet, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut sheet = Sheet::new(sheet_name);
    for result in reader.records() {
        let record = result.map_err(|e| e.to_string())?;
        sheet.push_row(record.iter().map(|f| f.to_string()).collect());
    }
    Ok(sheet)
}

/// Write one sheet as comma-separated values. Interior blank rows are kept
/// so row positions survive a round trip; trailing blank rows are dropped.
pub fn export(sheet: &Sheet, path: &Path) -> Result<(), IoError> {
    let write_err = |e: csv::Error| IoError::Write { path: path.to_path_buf(), reason: e.to_string() };

    // Rows may be variable width; trailing empty cells are omitted.
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(write_err)?;

    for row in sheet.trimmed_rows() {
        let end = row.iter().rposition(|c| !c.is_empty()).map_or(0, |i| i + 1);
        writer.write_record(&row[..end]).map_err(write_err)?;
    }

    writer
        .flush()
        .map_err(|e| IoError::Write { path: path.to_path_buf(), reason: e.to_string() })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rostersync_recon::Table;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn sniffs_semicolons() {
        assert_eq!(sniff_delimiter("a;b;c\n1;2;3\n"), b';');
        assert_eq!(sniff_delimiter("a,b\n1,2\n"), b',');
        assert_eq!(sniff_delimiter("single\n"), b',');
        assert_eq!(sniff_delimiter(""), b',');
    }

    #[test]
    fn import_keeps_ragged_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "\u{FEFF}Driver ID,Route\n100\n200,R2\n").unwrap();

        let wb = import(&path, "Data").unwrap();
        let sheet = wb.sheet("Data").unwrap();
        assert_eq!(sheet.rows()[0], vec!["Driver ID", "Route"]);
        assert_eq!(sheet.rows()[1], vec!["100"]);
        assert_eq!(sheet.row_count(), 3);
    }

    #[test]
    fn import_falls_back_to_windows_1252() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin.csv");
        // "José" with 0xE9 for é
        fs::write(&path, b"Name,ID\nJos\xE9,1\n").unwrap();
        let wb = import(&path, "Sheet1").unwrap();
        assert_eq!(wb.sheet("Sheet1").unwrap().rows()[1][0], "José");
    }

    #[test]
    fn export_round_trip_preserves_positions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let sheet = Sheet::from_strs(
            "vlookup",
            &[&["Driver Name", "Driver Number", "Supervisor"], &["Doe, Jane", "100", ""], &[], &["x"], &[""]],
        );
        export(&sheet, &path).unwrap();

        let back = import(&path, "vlookup").unwrap();
        let rows = back.sheet("vlookup").unwrap().rows();
        assert_eq!(rows[1], vec!["Doe, Jane", "100"]);
        assert_eq!(rows[3], vec!["x"]);
        assert_eq!(back.sheet("vlookup").unwrap().trimmed_rows().len(), 4);
    }
}
