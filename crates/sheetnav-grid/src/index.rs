//! Grid index: coordinate -> value and value -> coordinates.

use std::collections::HashMap;

use tracing::debug;

use crate::coord::Coordinate;
use crate::error::{GridError, Result};
use crate::grid::Grid;
use crate::value::CellValue;

/// A grid together with its finder index.
///
/// The finder maps every non-missing value to all coordinates holding it, in
/// ascending coordinate order. It is the exact inverse of the grid for
/// non-missing cells.
#[derive(Debug, Clone)]
pub struct GridIndex {
    grid: Grid,
    finder: HashMap<CellValue, Vec<Coordinate>>,
}

impl GridIndex {
    /// Index a grid. O(rows * cols).
    pub fn build(grid: Grid) -> Self {
        let mut finder: HashMap<CellValue, Vec<Coordinate>> = HashMap::new();

        // Grid::iter walks row-major, so each list is built already sorted.
        for (coord, value) in grid.iter() {
            if value.is_missing() {
                continue;
            }
            finder.entry(value.clone()).or_default().push(coord);
        }

        debug!(
            rows = grid.rows(),
            cols = grid.cols(),
            distinct = finder.len(),
            "built grid index"
        );

        Self { grid, finder }
    }

    /// Validate rows as a rectangle, then index them.
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Result<Self> {
        Ok(Self::build(Grid::from_rows(rows)?))
    }

    /// Exact cell lookup.
    pub fn value_at(&self, coord: Coordinate) -> Result<&CellValue> {
        self.grid.get(coord).ok_or(GridError::OutOfBounds {
            row: coord.row as i64,
            col: coord.col as i64,
            rows: self.grid.rows(),
            cols: self.grid.cols(),
        })
    }

    /// Every coordinate holding `value`, ascending. Empty when absent.
    pub fn occurrences(&self, value: &CellValue) -> &[Coordinate] {
        self.finder.get(value).map_or(&[], Vec::as_slice)
    }

    /// Cells of one row, left to right.
    pub fn row_cells(
        &self,
        row: usize,
    ) -> Result<impl Iterator<Item = (Coordinate, &CellValue)> + '_> {
        let cells = self.grid.row(row).ok_or(GridError::OutOfBounds {
            row: row as i64,
            col: 0,
            rows: self.grid.rows(),
            cols: self.grid.cols(),
        })?;
        Ok(cells
            .iter()
            .enumerate()
            .map(move |(col, value)| (Coordinate::new(row, col), value)))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    pub fn finder(&self) -> &HashMap<CellValue, Vec<Coordinate>> {
        &self.finder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GridIndex {
        GridIndex::from_rows(vec![
            vec!["Name".into(), "Hours".into(), "Hours".into()],
            vec!["Ann".into(), 8.into(), CellValue::Empty],
            vec!["Hours".into(), 8.into(), 4.into()],
        ])
        .unwrap()
    }

    #[test]
    fn test_value_at() {
        let index = sample();
        assert_eq!(
            index.value_at(Coordinate::new(1, 0)).unwrap(),
            &CellValue::from("Ann")
        );
        assert!(matches!(
            index.value_at(Coordinate::new(3, 0)),
            Err(GridError::OutOfBounds { row: 3, col: 0, .. })
        ));
        assert!(index.value_at(Coordinate::new(0, 3)).is_err());
    }

    #[test]
    fn test_occurrences_sorted() {
        let index = sample();
        assert_eq!(
            index.occurrences(&"Hours".into()),
            &[
                Coordinate::new(0, 1),
                Coordinate::new(0, 2),
                Coordinate::new(2, 0)
            ]
        );
        assert_eq!(
            index.occurrences(&8.into()),
            &[Coordinate::new(1, 1), Coordinate::new(2, 1)]
        );
    }

    #[test]
    fn test_missing_not_indexed() {
        let index = sample();
        assert!(index.occurrences(&CellValue::Empty).is_empty());
        assert!(index.occurrences(&"nobody".into()).is_empty());
    }

    #[test]
    fn test_malformed() {
        let result = GridIndex::from_rows(vec![vec![1.into()], vec![]]);
        assert!(matches!(result, Err(GridError::MalformedGrid { .. })));
    }

    #[test]
    fn test_row_cells() {
        let index = sample();
        let row: Vec<_> = index.row_cells(1).unwrap().map(|(c, _)| c.col).collect();
        assert_eq!(row, vec![0, 1, 2]);
        assert!(index.row_cells(3).is_err());
    }
}
