//! Error types for grid lookups.

use thiserror::Error;

/// Result type for grid operations
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors raised by the grid index and the label navigator.
///
/// Every lookup failure is surfaced to the caller; nothing falls back to a
/// default value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The value does not occur, or the requested occurrence is past the end
    #[error("'{value}' not found (occurrence {occurrence}, {available} available)")]
    NotFound {
        value: String,
        occurrence: usize,
        available: usize,
    },

    /// A coordinate outside the grid extent
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: i64,
        col: i64,
        rows: usize,
        cols: usize,
    },

    /// Input rows are not all the same width
    #[error("malformed grid: row {row} has {found} cells, expected {expected}")]
    MalformedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl GridError {
    /// Whether this error is a missing label/value
    pub fn is_not_found(&self) -> bool {
        matches!(self, GridError::NotFound { .. })
    }
}
