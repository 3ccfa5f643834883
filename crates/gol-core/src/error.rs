//! Error types for grid construction.

use std::error::Error;
use std::fmt;

/// Errors arising from [`Grid`](crate::Grid) construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// Attempted to construct a grid with zero rows or zero columns.
    EmptyGrid {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },
    /// `rows * cols` exceeds `isize::MAX`, the largest possible buffer.
    CellCountOverflow {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { rows, cols } => {
                write!(f, "grid must have at least one cell, got {rows} x {cols}")
            }
            Self::CellCountOverflow { rows, cols } => {
                write!(f, "cell count {rows} x {cols} is too large to allocate")
            }
        }
    }
}

impl Error for GridError {}
