//! Label navigator: relative lookups anchored on cell values.
//!
//! Worksheets in a budget tracker are not laid out on fixed coordinates.
//! Instead every region is found by searching for a label (a marker string,
//! date or number) and moving from there. Every operation takes an
//! occurrence index `k` to pick among repeated labels, numbered in ascending
//! coordinate order.

use tracing::debug;

use crate::coord::Coordinate;
use crate::error::{GridError, Result};
use crate::grid::Grid;
use crate::index::GridIndex;
use crate::value::CellValue;

/// A value together with where it was read from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Located<'a> {
    pub value: &'a CellValue,
    pub coord: Coordinate,
}

/// Label-based lookups over a [`GridIndex`].
#[derive(Debug, Clone)]
pub struct Navigator {
    index: GridIndex,
}

impl Navigator {
    pub fn new(grid: Grid) -> Self {
        Self {
            index: GridIndex::build(grid),
        }
    }

    pub fn index(&self) -> &GridIndex {
        &self.index
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.index.dimensions()
    }

    pub fn value_at(&self, coord: Coordinate) -> Result<&CellValue> {
        self.index.value_at(coord)
    }

    pub fn occurrences(&self, value: impl Into<CellValue>) -> &[Coordinate] {
        self.index.occurrences(&value.into())
    }

    /// The `k`-th occurrence of `value`.
    pub fn find(&self, value: impl Into<CellValue>, k: usize) -> Result<Coordinate> {
        let value = value.into();
        let found = self.index.occurrences(&value);
        found.get(k).copied().ok_or_else(|| GridError::NotFound {
            value: value.to_string(),
            occurrence: k,
            available: found.len(),
        })
    }

    /// First occurrence of `value` on `row`.
    pub fn find_in_row(&self, value: impl Into<CellValue>, row: usize) -> Result<Coordinate> {
        let value = value.into();
        let found = self.index.occurrences(&value);
        found
            .iter()
            .copied()
            .find(|c| c.row == row)
            .ok_or_else(|| GridError::NotFound {
                value: format!("{} on row {}", value, row),
                occurrence: 0,
                available: 0,
            })
    }

    /// Value where the row of `row_label` crosses the column of `col_label`.
    ///
    /// Both labels resolve to their first occurrence.
    pub fn value_at_intersection(
        &self,
        row_label: impl Into<CellValue>,
        col_label: impl Into<CellValue>,
    ) -> Result<&CellValue> {
        let row = self.find(row_label, 0)?.row;
        let col = self.find(col_label, 0)?.col;
        self.index.value_at(Coordinate::new(row, col))
    }

    /// Value at `find(label, k)` shifted by `(d_row, d_col)`.
    pub fn value_by_offset(
        &self,
        label: impl Into<CellValue>,
        k: usize,
        (d_row, d_col): (isize, isize),
    ) -> Result<&CellValue> {
        let anchor = self.find(label, k)?;
        let (rows, cols) = self.dimensions();
        let target = anchor
            .offset(d_row, d_col)
            .ok_or(GridError::OutOfBounds {
                row: anchor.row as i64 + d_row as i64,
                col: anchor.col as i64 + d_col as i64,
                rows,
                cols,
            })?;
        self.index.value_at(target)
    }

    /// Value on the anchor's row, in the column of the `k`-th `col_label`.
    pub fn value_in_row(
        &self,
        anchor: Coordinate,
        col_label: impl Into<CellValue>,
        k: usize,
    ) -> Result<&CellValue> {
        let col = self.find(col_label, k)?.col;
        self.index.value_at(Coordinate::new(anchor.row, col))
    }

    /// The column under a label, with any trailing run of missing cells
    /// removed.
    ///
    /// Gaps inside the run are kept, so rows stay aligned with sibling
    /// columns read from the same rows.
    pub fn values_below(&self, label: impl Into<CellValue>, k: usize) -> Result<Vec<Located<'_>>> {
        let anchor = self.find(label, k)?;
        let mut run = self.column_below(anchor);
        while run.last().is_some_and(|cell| cell.value.is_missing()) {
            run.pop();
        }
        debug!(%anchor, len = run.len(), "values below");
        Ok(run)
    }

    /// The numeric run directly under a label, stopping at the first missing
    /// or non-numeric cell.
    pub fn consecutive_values_below(
        &self,
        label: impl Into<CellValue>,
        k: usize,
    ) -> Result<Vec<Located<'_>>> {
        let anchor = self.find(label, k)?;
        let run: Vec<_> = self
            .column_below(anchor)
            .into_iter()
            .take_while(|cell| cell.value.is_numeric())
            .collect();
        debug!(%anchor, len = run.len(), "consecutive values below");
        Ok(run)
    }

    fn column_below(&self, anchor: Coordinate) -> Vec<Located<'_>> {
        let grid = self.index.grid();
        (anchor.row + 1..grid.rows())
            .filter_map(|row| {
                let coord = Coordinate::new(row, anchor.col);
                grid.get(coord).map(|value| Located { value, coord })
            })
            .collect()
    }
}
