//! Board loading.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use gol_core::Grid;

use crate::error::BoardError;

/// Parse board text held in memory.
///
/// # Examples
///
/// ```
/// let grid = gol_board::parse("3,2\n.x.\nx.X\n").unwrap();
/// assert_eq!((grid.rows(), grid.cols()), (2, 3));
/// assert_eq!(grid.live_count(), 3);
/// ```
pub fn parse(text: &str) -> Result<Grid, BoardError> {
    read_from(text.as_bytes())
}

/// Load the board stored at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Grid, BoardError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(BoardError::io(path))?;
    let grid = read_from(BufReader::new(file)).map_err(|e| match e {
        BoardError::Read(source) => BoardError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    tracing::debug!(
        path = %path.display(),
        rows = grid.rows(),
        cols = grid.cols(),
        live = grid.live_count(),
        "board loaded"
    );
    Ok(grid)
}

/// Read a board from any buffered source.
///
/// Cells are `x` or `X` for alive and any other byte for dead. Bytes past
/// the declared column count, trailing `\r`, and lines after the last row
/// are ignored.
pub fn read_from(reader: impl BufRead) -> Result<Grid, BoardError> {
    let mut lines = reader.split(b'\n');
    let header = match lines.next() {
        Some(line) => line.map_err(BoardError::Read)?,
        None => Vec::new(),
    };
    let (rows, cols) = parse_header(&header)?;

    // Every row is checked before the grid is allocated, so a short file
    // with a huge header fails without reserving memory for it.
    let mut live = Vec::new();
    for row in 0..rows {
        let line = match lines.next() {
            Some(line) => line.map_err(BoardError::Read)?,
            None => {
                return Err(BoardError::MissingRows {
                    expected: rows,
                    found: row,
                })
            }
        };
        let cells = strip_cr(&line);
        if cells.len() < cols {
            return Err(BoardError::TruncatedRow {
                row,
                expected: cols,
                found: cells.len(),
            });
        }
        live.extend(
            cells[..cols]
                .iter()
                .enumerate()
                .filter(|&(_, &b)| b == b'x' || b == b'X')
                .map(|(col, _)| (row, col)),
        );
    }

    let mut grid = Grid::new(rows, cols)?;
    for (row, col) in live {
        grid.set_cell(row, col, true);
    }
    Ok(grid)
}

fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// `"{cols},{rows}"` with optional surrounding whitespace.
fn parse_header(line: &[u8]) -> Result<(usize, usize), BoardError> {
    let text = String::from_utf8_lossy(strip_cr(line));
    let malformed = || BoardError::MalformedHeader {
        line: text.to_string(),
    };
    let (cols, rows) = text.trim().split_once(',').ok_or_else(malformed)?;
    let cols: i64 = cols.trim().parse().map_err(|_| malformed())?;
    let rows: i64 = rows.trim().parse().map_err(|_| malformed())?;
    if rows < 1 || cols < 1 {
        return Err(BoardError::NonPositiveDimensions { rows, cols });
    }
    let rows = usize::try_from(rows).map_err(|_| malformed())?;
    let cols = usize::try_from(cols).map_err(|_| malformed())?;
    Ok((rows, cols))
}
