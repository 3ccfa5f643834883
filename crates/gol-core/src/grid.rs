//! The packed toroidal grid and its toggle primitive.
//!
//! [`Grid`] owns one contiguous byte buffer. All mutation goes through a
//! [`RowBand`], a mutable window over a run of whole rows. The full grid is
//! a single band ([`Grid::band_mut`]); parallel engines split it with
//! [`RowBand::split_at_row`] so each worker owns a disjoint row range and the
//! borrow checker rules out overlapping writes.

use std::fmt;
use std::ops::Range;

use crate::cell::{self, ALIVE, NEIGHBOUR_UNIT};
use crate::error::GridError;
use crate::topology::Torus;

/// A fixed-size wrap-around Life board with packed cells.
///
/// Invariant: between generations, every cell's stored neighbour count
/// equals the number of its 8 toroidal neighbours that are alive. The only
/// way to change liveness is [`set_cell`](Self::set_cell) or the
/// [`RowBand`] toggles, all of which maintain it.
///
/// Equality is structural: same dimensions and byte-identical buffers, so a
/// corrupted neighbour count is a mismatch even when liveness agrees.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    torus: Torus,
    cells: Vec<u8>,
}

impl Grid {
    /// Create an all-dead grid of `rows * cols` cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use gol_core::Grid;
    ///
    /// let mut grid = Grid::new(4, 6).unwrap();
    /// grid.set_cell(0, 0, true);
    /// assert!(grid.get_cell(0, 0));
    /// // The wrapped diagonal neighbour sees it.
    /// assert_eq!(grid.neighbour_count(3, 5), 1);
    /// ```
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        let torus = Torus::new(rows, cols)?;
        Ok(Self {
            torus,
            cells: vec![0; torus.cell_count()],
        })
    }

    /// Grid topology.
    #[inline]
    pub fn torus(&self) -> Torus {
        self.torus
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.torus.rows()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.torus.cols()
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Raw packed cell bytes, row-major.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Raw packed byte of `(row, col)`.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        self.cells[self.torus.index(row, col)]
    }

    /// Whether `(row, col)` is alive.
    ///
    /// Coordinates must be in range; out-of-range indices panic.
    #[inline]
    pub fn get_cell(&self, row: usize, col: usize) -> bool {
        cell::is_alive(self.cell(row, col))
    }

    /// Live-neighbour count recorded for `(row, col)`.
    #[inline]
    pub fn neighbour_count(&self, row: usize, col: usize) -> u8 {
        cell::neighbours(self.cell(row, col))
    }

    /// Set `(row, col)` alive or dead, updating the neighbour counts around it.
    ///
    /// A no-op when the cell is already in the requested state.
    pub fn set_cell(&mut self, row: usize, col: usize, alive: bool) {
        if alive == self.get_cell(row, col) {
            return;
        }
        let mut band = self.band_mut();
        if alive {
            band.birth(row, col);
        } else {
            band.death(row, col);
        }
    }

    /// Mutable band covering every row.
    pub fn band_mut(&mut self) -> RowBand<'_> {
        RowBand {
            torus: self.torus,
            first_row: 0,
            cells: &mut self.cells,
        }
    }

    /// Number of live cells.
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&c| cell::is_alive(c)).count()
    }

    /// Coordinates of live cells in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols();
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| cell::is_alive(c))
            .map(move |(i, _)| (i / cols, i % cols))
    }

    /// Board text: `"{cols},{rows}\n"` then one line per row of `x`/`.`.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{},{}", self.cols(), self.rows())?;
        let mut line = String::with_capacity(self.cols() + 1);
        for row in self.cells.chunks_exact(self.cols()) {
            line.clear();
            line.extend(row.iter().map(|&c| if cell::is_alive(c) { 'x' } else { '.' }));
            line.push('\n');
            f.write_str(&line)?;
        }
        Ok(())
    }
}

// ── RowBand ─────────────────────────────────────────────────────

/// Exclusive mutable access to a contiguous run of whole rows.
///
/// Toggles write to the toggled cell and its 8 wrapped neighbours. Every
/// written row must lie inside the band; toggling a cell whose neighbourhood
/// leaves the band is a caller bug and panics.
pub struct RowBand<'a> {
    torus: Torus,
    first_row: usize,
    cells: &'a mut [u8],
}

impl<'a> RowBand<'a> {
    /// Topology of the whole grid this band belongs to.
    #[inline]
    pub fn torus(&self) -> Torus {
        self.torus
    }

    /// Global index of the first row in the band.
    #[inline]
    pub fn first_row(&self) -> usize {
        self.first_row
    }

    /// Global row range covered by the band.
    pub fn rows(&self) -> Range<usize> {
        self.first_row..self.first_row + self.cells.len() / self.torus.cols()
    }

    /// Whether `row` (global) is inside the band.
    #[inline]
    pub fn contains_row(&self, row: usize) -> bool {
        self.rows().contains(&row)
    }

    /// Raw packed byte at global `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[self.local(self.torus.index(row, col))]
    }

    /// Bring a dead cell to life. The cell must currently be dead.
    #[inline]
    pub fn birth(&mut self, row: usize, col: usize) {
        debug_assert!(!cell::is_alive(self.get(row, col)), "birth of a live cell");
        for idx in self.torus.neighbour_indices(row, col) {
            let i = self.local(idx);
            self.cells[i] += NEIGHBOUR_UNIT;
        }
        let i = self.local(self.torus.index(row, col));
        self.cells[i] |= ALIVE;
    }

    /// Kill a live cell. The cell must currently be alive.
    #[inline]
    pub fn death(&mut self, row: usize, col: usize) {
        debug_assert!(cell::is_alive(self.get(row, col)), "death of a dead cell");
        for idx in self.torus.neighbour_indices(row, col) {
            let i = self.local(idx);
            self.cells[i] -= NEIGHBOUR_UNIT;
        }
        let i = self.local(self.torus.index(row, col));
        self.cells[i] &= !ALIVE;
    }

    /// Split into `[first_row, row)` and `[row, end)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` lies outside `first_row..=end`.
    pub fn split_at_row(self, row: usize) -> (RowBand<'a>, RowBand<'a>) {
        let end = self.rows().end;
        assert!(
            (self.first_row..=end).contains(&row),
            "split row {row} outside band {}..{end}",
            self.first_row
        );
        let mid = (row - self.first_row) * self.torus.cols();
        let (head, tail) = self.cells.split_at_mut(mid);
        (
            RowBand {
                torus: self.torus,
                first_row: self.first_row,
                cells: head,
            },
            RowBand {
                torus: self.torus,
                first_row: row,
                cells: tail,
            },
        )
    }

    /// Split into consecutive bands, one per range in `slices`.
    ///
    /// `slices` must be contiguous, ascending, and exactly cover the band.
    pub fn split_rows(self, slices: &[Range<usize>]) -> Vec<RowBand<'a>> {
        let mut out = Vec::with_capacity(slices.len());
        let mut rest = self;
        for slice in slices {
            assert_eq!(slice.start, rest.first_row, "slices must be contiguous");
            let (head, tail) = rest.split_at_row(slice.end);
            out.push(head);
            rest = tail;
        }
        assert!(rest.cells.is_empty(), "slices must cover the whole band");
        out
    }

    #[inline]
    fn local(&self, index: usize) -> usize {
        let base = self.first_row * self.torus.cols();
        debug_assert!(
            index >= base && index - base < self.cells.len(),
            "index {index} outside band rows {:?}",
            self.rows()
        );
        index - base
    }
}

impl fmt::Debug for RowBand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowBand")
            .field("rows", &self.rows())
            .field("cols", &self.torus.cols())
            .finish()
    }
}
