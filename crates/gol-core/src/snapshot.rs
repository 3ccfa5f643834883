//! Read-only copy of a grid taken at the start of a generation.
//!
//! Engines classify every cell against a [`Snapshot`] and apply toggles to
//! the live [`Grid`]. Since the snapshot never changes while a generation is
//! in flight, no classification can observe another cell's toggle, and the
//! order in which toggles land does not matter.

use crate::grid::Grid;
use crate::topology::Torus;

/// Frozen packed cells of one generation.
///
/// The buffer is reused across generations through
/// [`refresh`](Self::refresh), so steady-state runs allocate once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    torus: Torus,
    cells: Vec<u8>,
}

impl Snapshot {
    /// Copy the current state of `grid`.
    pub fn capture(grid: &Grid) -> Self {
        Self {
            torus: grid.torus(),
            cells: grid.cells().to_vec(),
        }
    }

    /// Overwrite this snapshot with the current state of `grid`.
    ///
    /// Reallocates only when the grid dimensions changed.
    pub fn refresh(&mut self, grid: &Grid) {
        if self.torus == grid.torus() {
            self.cells.copy_from_slice(grid.cells());
        } else {
            *self = Self::capture(grid);
        }
    }

    /// Topology of the captured grid.
    #[inline]
    pub fn torus(&self) -> Torus {
        self.torus
    }

    /// All packed cells, row-major.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Packed cells of one row.
    #[inline]
    pub fn row(&self, row: usize) -> &[u8] {
        let cols = self.torus.cols();
        &self.cells[row * cols..(row + 1) * cols]
    }

    /// Packed byte of `(row, col)`.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        self.cells[self.torus.index(row, col)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_is_frozen() {
        let mut g = Grid::new(3, 3).unwrap();
        g.set_cell(1, 1, true);
        let snap = Snapshot::capture(&g);
        g.set_cell(1, 1, false);
        assert_eq!(snap.cell(1, 1), 1);
        assert_eq!(snap.cell(0, 0), 2);
        assert_eq!(g.cell(1, 1), 0);
    }

    #[test]
    fn refresh_reuses_buffer() {
        let mut g = Grid::new(4, 4).unwrap();
        let mut snap = Snapshot::capture(&g);
        g.set_cell(2, 3, true);
        snap.refresh(&g);
        assert_eq!(snap.cells(), g.cells());
        assert_eq!(snap.row(2), &g.cells()[8..12]);
    }

    #[test]
    fn refresh_handles_new_dimensions() {
        let small = Grid::new(2, 2).unwrap();
        let mut big = Grid::new(5, 3).unwrap();
        big.set_cell(4, 2, true);
        let mut snap = Snapshot::capture(&small);
        snap.refresh(&big);
        assert_eq!(snap.torus(), big.torus());
        assert_eq!(snap.cells(), big.cells());
    }
}
