//! Integration tests for sheetnav-data

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};
use sheetnav_data::{DataError, DataSource, ExcelSource, SheetOptions, Workbook};
use sheetnav_grid::{CellValue, Coordinate};
use tempfile::TempDir;

/// Write a two-sheet tracker fixture and return its path
fn write_fixture(dir: &Path) -> PathBuf {
    let mut workbook = XlsxWorkbook::new();
    let date = Format::new().set_num_format("yyyy-mm-dd");

    let pricing = workbook.add_worksheet();
    pricing.set_name("Gignow").unwrap();
    pricing.write_string(0, 0, "Pricing Scenario").unwrap();
    pricing.write_string(1, 0, "Name").unwrap();
    pricing.write_string(1, 1, "Hours").unwrap();
    pricing.write_string(2, 0, "Ann").unwrap();
    pricing.write_number(2, 1, 40.0).unwrap();
    pricing.write_string(3, 0, "Bob").unwrap();
    pricing.write_number(3, 1, 37.5).unwrap();

    let burn = workbook.add_worksheet();
    burn.set_name("Burn Chart").unwrap();
    // 2020-03-06 as an Excel serial
    burn.write_number_with_format(0, 3, 43896.0, &date).unwrap();
    burn.write_string(1, 3, "FY20 Wk 01").unwrap();

    let path = dir.join("Budget Tracker 1005.xlsx");
    workbook.save(&path).unwrap();
    path
}

#[test]
fn test_excel_source_lists_sheets() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path());

    let source = ExcelSource::new(&path).expect("Failed to open Excel file");
    let sheets = source.list_sheets().expect("Failed to list sheets");
    assert_eq!(sheets, vec!["Gignow".to_string(), "Burn Chart".to_string()]);
    assert_eq!(source.default_sheet(), Some("Gignow".to_string()));
}

#[test]
fn test_excel_read_sheet() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path());

    let source = ExcelSource::new(&path).unwrap();
    let grid = source.read_sheet("Gignow", &SheetOptions::raw()).unwrap();

    assert_eq!(grid.dimensions(), (4, 2));
    assert_eq!(
        grid.get(Coordinate::new(2, 0)),
        Some(&CellValue::from("Ann"))
    );
    assert_eq!(grid.get(Coordinate::new(3, 1)), Some(&CellValue::Number(37.5)));
}

#[test]
fn test_excel_header_rows_stripped() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path());

    let workbook = Workbook::open(&path).unwrap();
    let nav = workbook
        .navigator("Gignow", &SheetOptions::with_header_rows(1))
        .unwrap();

    assert!(nav.find("Pricing Scenario", 0).is_err());
    assert_eq!(nav.find("Name", 0).unwrap(), Coordinate::new(0, 0));

    let hours: Vec<f64> = nav
        .consecutive_values_below("Hours", 0)
        .unwrap()
        .iter()
        .filter_map(|l| l.value.as_f64())
        .collect();
    assert_eq!(hours, vec![40.0, 37.5]);
}

#[test]
fn test_excel_dates_are_labels() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path());

    let workbook = Workbook::open(&path).unwrap();
    let nav = workbook.navigator("Burn Chart", &SheetOptions::raw()).unwrap();

    let friday = NaiveDate::from_ymd_opt(2020, 3, 6).unwrap();
    assert_eq!(nav.find(friday, 0).unwrap(), Coordinate::new(0, 3));
    assert_eq!(
        nav.value_by_offset(friday, 0, (1, 0)).unwrap(),
        &CellValue::from("FY20 Wk 01")
    );
}

#[test]
fn test_excel_invalid_sheet_name() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path());

    let source = ExcelSource::new(&path).unwrap();
    let result = source.read_sheet("Nonexistent", &SheetOptions::raw());
    assert!(matches!(result, Err(DataError::SheetNotFound(_))));
}

#[test]
fn test_workbook_tag() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path());

    let workbook = Workbook::open(&path).unwrap();
    assert_eq!(workbook.tag(), "1005");
}

#[test]
fn test_workbook_csv() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("export 0824.csv");
    std::fs::write(&path, "Name,Hours\nAnn,8\n").unwrap();

    let workbook = Workbook::open(&path).unwrap();
    assert_eq!(workbook.sheet_names().unwrap(), vec!["data".to_string()]);
    let nav = workbook.navigator("data", &SheetOptions::raw()).unwrap();
    assert_eq!(
        nav.value_by_offset("Ann", 0, (0, 1)).unwrap(),
        &CellValue::Number(8.0)
    );
}
