//! Error types for loading and saving boards.

use std::fmt;
use std::io;
use std::path::PathBuf;

use gol_core::GridError;

/// Errors from reading or writing board text.
#[derive(Debug)]
pub enum BoardError {
    /// Opening, reading or writing a file failed.
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// Reading from a stream failed.
    Read(io::Error),
    /// The first line is not `"{cols},{rows}"`.
    MalformedHeader {
        /// The header line as read.
        line: String,
    },
    /// A dimension in the header is zero or negative.
    NonPositiveDimensions {
        /// Declared rows.
        rows: i64,
        /// Declared columns.
        cols: i64,
    },
    /// The text ended before every row was read.
    MissingRows {
        /// Rows declared in the header.
        expected: usize,
        /// Rows present.
        found: usize,
    },
    /// A row is shorter than the declared column count.
    TruncatedRow {
        /// Zero-based row index.
        row: usize,
        /// Columns declared in the header.
        expected: usize,
        /// Characters present.
        found: usize,
    },
    /// The declared dimensions do not describe a valid grid.
    Grid(GridError),
}

impl BoardError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Read(e) => write!(f, "read failed: {e}"),
            Self::MalformedHeader { line } => {
                write!(f, "malformed header {line:?}, expected \"<cols>,<rows>\"")
            }
            Self::NonPositiveDimensions { rows, cols } => {
                write!(f, "board dimensions must be positive, got {cols},{rows}")
            }
            Self::MissingRows { expected, found } => {
                write!(f, "expected {expected} rows, found {found}")
            }
            Self::TruncatedRow {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} cells, expected {expected}"),
            Self::Grid(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for BoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Read(e) => Some(e),
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for BoardError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
