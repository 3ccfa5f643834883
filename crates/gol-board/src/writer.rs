//! Board saving.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use gol_core::Grid;

use crate::error::BoardError;

/// Write `grid` as board text to `writer`.
pub fn write_to(grid: &Grid, mut writer: impl Write) -> std::io::Result<()> {
    write!(writer, "{grid}")?;
    writer.flush()
}

/// Save `grid` to `path`, replacing any existing file.
pub fn save(grid: &Grid, path: impl AsRef<Path>) -> Result<(), BoardError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(BoardError::io(path))?;
    write_to(grid, BufWriter::new(file)).map_err(BoardError::io(path))?;
    tracing::debug!(path = %path.display(), "board saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let mut g = Grid::new(2, 3).unwrap();
        g.set_cell(0, 2, true);
        g.set_cell(1, 0, true);
        let mut out = Vec::new();
        write_to(&g, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "3,2\n..x\nx..\n");
    }

    #[test]
    fn unwritable_path_reports_path() {
        let g = Grid::new(1, 1).unwrap();
        let err = save(&g, "/definitely/not/here/board.txt").unwrap_err();
        assert!(matches!(err, BoardError::Io { .. }));
    }
}
