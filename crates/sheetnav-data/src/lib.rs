//! # sheetnav-data
//!
//! Workbook loading for sheetnav: read worksheets from Excel, ODS or CSV
//! files into [`sheetnav_grid::Grid`] snapshots ready for label navigation.
//!
//! ## Features
//!
//! - **Excel Support**: `.xlsx`, `.xlsm`, `.xlsb`, `.xls` and `.ods` through `calamine`
//! - **CSV Support**: single-sheet exports through `csv`
//! - **Header stripping**: drop leading header rows per sheet with [`SheetOptions`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use sheetnav_data::{SheetOptions, Workbook};
//!
//! let workbook = Workbook::open("input/Budget Tracker 1005.xlsx")?;
//! let nav = workbook.navigator("Gignow", &SheetOptions::with_header_rows(1))?;
//! let total = nav.value_at_intersection("Total", "Total Fees Discounted")?;
//! ```

pub mod error;
pub mod sources;

use std::path::{Path, PathBuf};

use sheetnav_grid::{Grid, Navigator};

// Re-exports
pub use error::{DataError, Result};
pub use sources::{CsvOptions, CsvSource, DataSource, ExcelSource, SheetOptions};

/// Extensions handled by [`ExcelSource`]
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// An opened workbook file, backed by the source matching its extension
pub struct Workbook {
    path: PathBuf,
    source: Box<dyn DataSource>,
}

impl Workbook {
    /// Open a workbook, choosing the source from the file extension
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let source: Box<dyn DataSource> = if ext == "csv" {
            Box::new(CsvSource::new(path)?)
        } else if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
            Box::new(ExcelSource::new(path)?)
        } else {
            return Err(DataError::UnsupportedFormat(path.display().to_string()));
        };

        Ok(Self {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sheet_names(&self) -> Result<Vec<String>> {
        self.source.list_sheets()
    }

    pub fn default_sheet(&self) -> Option<String> {
        self.source.default_sheet()
    }

    /// Read one worksheet as a grid
    pub fn grid(&self, sheet: &str, options: &SheetOptions) -> Result<Grid> {
        self.source.read_sheet(sheet, options)
    }

    /// Read one worksheet and index it for label lookups
    pub fn navigator(&self, sheet: &str, options: &SheetOptions) -> Result<Navigator> {
        Ok(Navigator::new(self.grid(sheet, options)?))
    }

    /// Short tag used to name report files.
    ///
    /// The first four characters of the last whitespace-separated word of
    /// the file name: `Budget Tracker 1005.xlsx` gives `1005`.
    pub fn tag(&self) -> String {
        file_tag(&self.path)
    }
}

/// See [`Workbook::tag`]
pub fn file_tag(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.split_whitespace()
        .last()
        .unwrap_or_default()
        .chars()
        .take(4)
        .collect()
}
