//! # sheetnav-grid
//!
//! Label-addressed lookups over spreadsheet worksheets.
//!
//! Budget trackers are edited by hand, so nothing lives at a fixed address.
//! This crate indexes a worksheet snapshot by value and lets callers locate
//! regions by their labels:
//!
//! - [`Grid`]: immutable rectangular snapshot of one worksheet
//! - [`GridIndex`]: coordinate -> value map plus the value -> coordinates finder
//! - [`Navigator`]: "below", "intersection" and "offset" lookups from labels
//!
//! ## Example
//!
//! ```
//! use sheetnav_grid::{CellValue, Coordinate, Grid, Navigator};
//!
//! let grid = Grid::from_rows(vec![
//!     vec!["".into(), "Fees".into()],
//!     vec!["Total".into(), 1200.into()],
//! ])
//! .unwrap();
//! let nav = Navigator::new(grid);
//!
//! assert_eq!(nav.find("Fees", 0).unwrap(), Coordinate::new(0, 1));
//! assert_eq!(
//!     nav.value_at_intersection("Total", "Fees").unwrap(),
//!     &CellValue::Number(1200.0)
//! );
//! ```

pub mod coord;
pub mod error;
pub mod grid;
pub mod index;
pub mod navigator;
pub mod value;

pub use coord::{column_name, Coordinate};
pub use error::{GridError, Result};
pub use grid::Grid;
pub use index::GridIndex;
pub use navigator::{Located, Navigator};
pub use value::CellValue;
