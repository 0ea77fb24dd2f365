//! Immutable rectangular worksheet snapshot.

use crate::coord::Coordinate;
use crate::error::{GridError, Result};
use crate::value::CellValue;

/// Row-major rectangular table of cell values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    cells: Vec<CellValue>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Build a grid from rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let height = rows.len();
        let mut cells = Vec::with_capacity(height * cols);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::MalformedGrid {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }

        Ok(Self {
            cells,
            rows: height,
            cols,
        })
    }

    /// Build a grid from rows, padding short rows with [`CellValue::Empty`].
    pub fn from_rows_padded(rows: Vec<Vec<CellValue>>) -> Self {
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let height = rows.len();
        let mut cells = Vec::with_capacity(height * cols);

        for mut row in rows {
            row.resize(cols, CellValue::Empty);
            cells.extend(row);
        }

        Self {
            cells,
            rows: height,
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    pub fn get(&self, coord: Coordinate) -> Option<&CellValue> {
        if self.contains(coord) {
            self.cells.get(coord.row * self.cols + coord.col)
        } else {
            None
        }
    }

    /// One row as a slice
    pub fn row(&self, row: usize) -> Option<&[CellValue]> {
        if row < self.rows {
            Some(&self.cells[row * self.cols..(row + 1) * self.cols])
        } else {
            None
        }
    }

    /// All cells in ascending coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &CellValue)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, value)| (Coordinate::new(i / cols, i % cols), value))
    }

    /// A copy without the first `n` rows (stripped header rows).
    pub fn skip_rows(&self, n: usize) -> Self {
        let n = n.min(self.rows);
        Self {
            cells: self.cells[n * self.cols..].to_vec(),
            rows: self.rows - n,
            cols: self.cols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::from(*v)).collect()
    }

    #[test]
    fn test_from_rows() {
        let grid = Grid::from_rows(vec![cells(&["a", "b"]), cells(&["c", "d"])]).unwrap();
        assert_eq!(grid.dimensions(), (2, 2));
        assert_eq!(grid.get(Coordinate::new(1, 0)), Some(&CellValue::from("c")));
        assert_eq!(grid.get(Coordinate::new(2, 0)), None);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Grid::from_rows(vec![cells(&["a", "b"]), cells(&["c"])]).unwrap_err();
        assert_eq!(
            err,
            GridError::MalformedGrid {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_padded() {
        let grid = Grid::from_rows_padded(vec![cells(&["a"]), cells(&["b", "c", "d"])]);
        assert_eq!(grid.dimensions(), (2, 3));
        assert_eq!(grid.get(Coordinate::new(0, 2)), Some(&CellValue::Empty));
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid::from_rows(Vec::new()).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.iter().count(), 0);
    }

    #[test]
    fn test_skip_rows() {
        let grid = Grid::from_rows(vec![cells(&["h1", "h2"]), cells(&["a", "b"])]).unwrap();
        let body = grid.skip_rows(1);
        assert_eq!(body.dimensions(), (1, 2));
        assert_eq!(body.row(0), Some(&cells(&["a", "b"])[..]));
        assert_eq!(grid.skip_rows(5).rows(), 0);
    }
}
