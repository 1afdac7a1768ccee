use rostersync_io::{open, save, xlsx, IoError};
use rostersync_recon::{Sheet, Table, Workbook};
use tempfile::tempdir;

fn shorts_workbook() -> Workbook {
    Workbook::with_sheets(vec![
        Sheet::from_strs("Data", &[&["Date", "Driver ID"], &["45000", "100"], &["45001", "007"]]),
        Sheet::from_strs(
            "vlookup",
            &[&["Driver Name", "Driver Number", "Supervisor"], &["Jane Doe", "100", "Boss One"]],
        ),
        Sheet::from_strs("Notes", &[&[], &["", "offset"]]),
    ])
}

#[test]
fn round_trip_preserves_sheets_and_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shorts.xlsx");
    xlsx::export(&shorts_workbook(), &path).unwrap();

    let back = open(&path, "unused").unwrap();
    assert_eq!(back.sheet_names(), vec!["Data", "vlookup", "Notes"]);
    for sheet in shorts_workbook().sheets() {
        assert_eq!(back.sheet(&sheet.name).unwrap().rows(), sheet.rows(), "sheet {}", sheet.name);
    }
}

#[test]
fn leading_zero_identifiers_stay_text() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ids.xlsx");
    xlsx::export(&shorts_workbook(), &path).unwrap();

    let back = xlsx::import(&path).unwrap();
    assert_eq!(back.sheet("Data").unwrap().rows()[2][1], "007");
}

#[test]
fn trailing_blank_rows_are_not_imported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blank.xlsx");
    let mut sheet = Sheet::from_strs("vlookup", &[&["Driver Name", "Driver Number", "Supervisor"]]);
    // Blank cells past the data are never written.
    sheet.set_cell(0, 5, "");
    xlsx::export(&Workbook::with_sheets(vec![sheet]), &path).unwrap();

    let back = xlsx::import(&path).unwrap();
    assert_eq!(back.sheet("vlookup").unwrap().row_count(), 1);
}

#[test]
fn csv_output_holds_the_named_sheet() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vlookup.csv");
    save(&shorts_workbook(), &path, "vlookup").unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, "Driver Name,Driver Number,Supervisor\nJane Doe,100,Boss One\n");

    let err = save(&shorts_workbook(), &dir.path().join("x.csv"), "missing").unwrap_err();
    assert!(matches!(err, IoError::Write { .. }));
}

#[test]
fn garbage_file_is_corrupt() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"not a zip archive").unwrap();
    let err = open(&path, "Sheet1").unwrap_err();
    assert!(matches!(err, IoError::Corrupt { .. }), "{err}");
}

#[test]
fn cell_types_survive_import_and_export() {
    use calamine::{open_workbook_auto, Data, Reader};
    use rust_xlsxwriter::Format;

    let dir = tempdir().unwrap();
    let input = dir.path().join("in.xlsx");
    let output = dir.path().join("out.xlsx");

    let mut source = rust_xlsxwriter::Workbook::new();
    let date = Format::new().set_num_format("yyyy-mm-dd");
    let ws = source.add_worksheet().set_name("Data").unwrap();
    ws.write_string(0, 0, "Date").unwrap();
    ws.write_string(0, 1, "Driver ID").unwrap();
    ws.write_string(0, 2, "Shorts").unwrap();
    ws.write_string(0, 3, "Active").unwrap();
    ws.write_number_with_format(1, 0, 45352.0, &date).unwrap();
    ws.write_string(1, 1, "555").unwrap();
    ws.write_number(1, 2, 3.0).unwrap();
    ws.write_boolean(1, 3, true).unwrap();
    source.save(&input).unwrap();

    let mut book = xlsx::import(&input).unwrap();
    let data = book.sheet_mut("Data").unwrap();
    assert_eq!(data.rows()[1], vec!["45352", "555", "3", "TRUE"]);
    // Values written by the engine are text, even when they look numeric.
    data.set_cell(1, 3, "100");
    xlsx::export(&book, &output).unwrap();

    let mut back = open_workbook_auto(&output).unwrap();
    let range = back.worksheet_range("Data").unwrap();
    assert!(matches!(range.get_value((1, 0)), Some(Data::DateTime(_))), "{:?}", range.get_value((1, 0)));
    assert_eq!(range.get_value((1, 1)), Some(&Data::String("555".into())));
    assert_eq!(range.get_value((1, 2)), Some(&Data::Float(3.0)));
    assert_eq!(range.get_value((1, 3)), Some(&Data::Bool(true)));
    assert_eq!(range.get_value((2, 1)), Some(&Data::String("100".into())));
}
