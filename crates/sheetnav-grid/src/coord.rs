//! Zero-based cell coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A (row, column) pair.
///
/// Ordering is lexicographic: row first, then column. The finder index relies
/// on this order to number repeated labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Coordinate-wise addition of a signed delta.
    ///
    /// Returns `None` when the result would fall above row 0 or left of
    /// column 0.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }

    /// Excel-style reference, e.g. `(3, 5)` -> `F4`.
    pub fn a1(&self) -> String {
        format!("{}{}", column_name(self.col), self.row + 1)
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Convert a 0-indexed column number to letters (0=A, 25=Z, 26=AA).
pub fn column_name(col: usize) -> String {
    let mut letters = Vec::new();
    let mut n = col + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_order() {
        let mut coords = vec![
            Coordinate::new(2, 0),
            Coordinate::new(0, 5),
            Coordinate::new(0, 1),
            Coordinate::new(1, 9),
        ];
        coords.sort();
        assert_eq!(
            coords,
            vec![
                Coordinate::new(0, 1),
                Coordinate::new(0, 5),
                Coordinate::new(1, 9),
                Coordinate::new(2, 0),
            ]
        );
    }

    #[test]
    fn test_offset() {
        let c = Coordinate::new(2, 4);
        assert_eq!(c.offset(0, 1), Some(Coordinate::new(2, 5)));
        assert_eq!(c.offset(-2, -4), Some(Coordinate::new(0, 0)));
        assert_eq!(c.offset(-3, 0), None);
        assert_eq!(c.offset(0, -5), None);
    }

    #[test]
    fn test_column_name() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(51), "AZ");
        assert_eq!(column_name(52), "BA");
        assert_eq!(Coordinate::new(3, 5).a1(), "F4");
    }
}
