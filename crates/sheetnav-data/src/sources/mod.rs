//! Data source implementations.
//!
//! This module contains adapters for the workbook formats a budget tracker
//! may arrive in (Excel/ODS through calamine, CSV exports).

pub mod csv;
pub mod excel;

pub use csv::{CsvOptions, CsvSource};
pub use excel::ExcelSource;

use sheetnav_grid::Grid;

use crate::error::Result;

/// How a worksheet is cut before indexing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SheetOptions {
    /// Leading rows dropped before the grid is built.
    ///
    /// Labels inside stripped rows cannot be found, and occurrence numbering
    /// starts after them.
    pub header_rows: usize,
}

impl SheetOptions {
    /// Keep every row
    pub fn raw() -> Self {
        Self::default()
    }

    /// Strip `n` leading header rows
    pub fn with_header_rows(n: usize) -> Self {
        Self { header_rows: n }
    }
}

/// Trait for sources that can provide worksheet grids
pub trait DataSource {
    /// Read a whole worksheet as a rectangular grid addressed from A1
    fn read_sheet(&self, sheet: &str, options: &SheetOptions) -> Result<Grid>;

    /// List available sheets
    fn list_sheets(&self) -> Result<Vec<String>>;

    /// Get the default sheet name
    fn default_sheet(&self) -> Option<String>;
}
