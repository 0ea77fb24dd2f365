//! Excel/ODS data source using calamine.

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use sheetnav_grid::{CellValue, Grid};
use tracing::debug;

use crate::error::{DataError, Result};
use crate::sources::{DataSource, SheetOptions};

/// Excel workbook data source (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`)
pub struct ExcelSource {
    /// Path to the workbook
    path: PathBuf,
    /// Sheet names cache
    sheet_names: Vec<String>,
}

impl ExcelSource {
    /// Create a new Excel source from a file path
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DataError::FileNotFound(path.display().to_string()));
        }

        let workbook = open_workbook_auto(path)
            .map_err(|e| DataError::WorkbookOpen(format!("{}: {}", path.display(), e)))?;

        let sheet_names = workbook.sheet_names().to_vec();

        Ok(Self {
            path: path.to_path_buf(),
            sheet_names,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Convert a calamine cell to a grid value
    fn cell_to_value(cell: &Data) -> CellValue {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::String(s) if s.is_empty() => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::Error(e) => CellValue::Text(format!("#ERROR: {:?}", e)),
            Data::DateTime(dt) => CellValue::from_excel_serial(dt.as_f64()),
            Data::DateTimeIso(s) => Self::parse_iso(s),
            Data::DurationIso(s) => CellValue::Text(s.clone()),
        }
    }

    fn parse_iso(s: &str) -> CellValue {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return CellValue::Date(dt);
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return CellValue::from(d);
        }
        CellValue::Text(s.to_string())
    }

    /// Lay a calamine range out on absolute coordinates.
    ///
    /// Calamine ranges start at the first used cell; the grid always starts
    /// at A1 so coordinates match what a reader sees in the workbook.
    fn range_to_grid(range: &Range<Data>) -> Grid {
        let Some((end_row, end_col)) = range.end() else {
            return Grid::default();
        };

        let rows = (0..=end_row)
            .map(|r| {
                (0..=end_col)
                    .map(|c| {
                        range
                            .get_value((r, c))
                            .map_or(CellValue::Empty, Self::cell_to_value)
                    })
                    .collect()
            })
            .collect();

        Grid::from_rows_padded(rows)
    }
}

impl DataSource for ExcelSource {
    fn read_sheet(&self, sheet: &str, options: &SheetOptions) -> Result<Grid> {
        // Re-open workbook for reading (calamine requires this pattern)
        let mut workbook = open_workbook_auto(&self.path)
            .map_err(|e| DataError::WorkbookOpen(format!("{}: {}", self.path.display(), e)))?;

        let range = workbook
            .worksheet_range(sheet)
            .map_err(|e| DataError::SheetNotFound(format!("{}: {}", sheet, e)))?;

        let grid = Self::range_to_grid(&range).skip_rows(options.header_rows);
        debug!(
            sheet,
            rows = grid.rows(),
            cols = grid.cols(),
            header_rows = options.header_rows,
            "loaded worksheet"
        );
        Ok(grid)
    }

    fn list_sheets(&self) -> Result<Vec<String>> {
        Ok(self.sheet_names.clone())
    }

    fn default_sheet(&self) -> Option<String> {
        self.sheet_names.first().cloned()
    }
}
