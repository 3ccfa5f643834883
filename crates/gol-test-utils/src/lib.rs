//! Test utilities for Game of Life engine development.
//!
//! Provides pattern [`fixtures`], seeded random boards, a deliberately
//! naive [`reference_next`] stepper that recomputes everything from
//! liveness alone, and checks for the packed-encoding invariant.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::BTreeSet;

use gol_core::cell::MAX_CELL;
use gol_core::Grid;

pub use fixtures::{grid_with, place, random_grid, BEEHIVE, BLINKER, BLOCK, GLIDER};

/// One generation computed from liveness alone.
///
/// Neighbours are counted over the 8 wrapped positions, so a neighbour that
/// appears twice on a degenerate grid is counted twice, exactly as the
/// packed toggles count it.
pub fn reference_next(grid: &Grid) -> Grid {
    let torus = grid.torus();
    let mut next = Grid::new(grid.rows(), grid.cols()).expect("source grid is non-empty");
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let n = torus
                .neighbours(row, col)
                .iter()
                .filter(|&&(r, c)| grid.get_cell(r, c))
                .count();
            let alive = grid.get_cell(row, col);
            if n == 3 || (alive && n == 2) {
                next.set_cell(row, col, true);
            }
        }
    }
    next
}

/// [`reference_next`] applied `generations` times.
pub fn reference_run(grid: &Grid, generations: u64) -> Grid {
    let mut current = grid.clone();
    for _ in 0..generations {
        current = reference_next(&current);
    }
    current
}

/// A cell whose stored byte disagrees with its recomputed neighbourhood.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodingMismatch {
    pub row: usize,
    pub col: usize,
    pub stored: u8,
    pub expected_neighbours: u8,
}

/// Every cell whose stored neighbour count differs from the live count
/// around it, or whose byte exceeds [`MAX_CELL`].
pub fn encoding_mismatches(grid: &Grid) -> Vec<EncodingMismatch> {
    let torus = grid.torus();
    let mut out = Vec::new();
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let expected = torus
                .neighbours(row, col)
                .iter()
                .filter(|&&(r, c)| grid.get_cell(r, c))
                .count() as u8;
            let stored = grid.cell(row, col);
            if stored > MAX_CELL || grid.neighbour_count(row, col) != expected {
                out.push(EncodingMismatch {
                    row,
                    col,
                    stored,
                    expected_neighbours: expected,
                });
            }
        }
    }
    out
}

/// Panic with the first few offending cells if the encoding is broken.
#[track_caller]
pub fn assert_encoding_invariant(grid: &Grid) {
    let bad = encoding_mismatches(grid);
    assert!(
        bad.is_empty(),
        "{} cells violate the encoding, first: {:?}",
        bad.len(),
        &bad[..bad.len().min(5)]
    );
}

/// Live cells as an ordered set.
pub fn live_set(grid: &Grid) -> BTreeSet<(usize, usize)> {
    grid.live_cells().collect()
}

/// `cells` shifted by `(dr, dc)` on a `rows x cols` torus.
pub fn translate(
    cells: &BTreeSet<(usize, usize)>,
    dr: usize,
    dc: usize,
    rows: usize,
    cols: usize,
) -> BTreeSet<(usize, usize)> {
    cells
        .iter()
        .map(|&(r, c)| ((r + dr) % rows, (c + dc) % cols))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_blinker() {
        let start = grid_with(5, 5, BLINKER, 2, 1);
        let next = reference_next(&start);
        let live: Vec<_> = next.live_cells().collect();
        assert_eq!(live, vec![(1, 2), (2, 2), (3, 2)]);
        assert_eq!(reference_run(&start, 2), start);
    }

    #[test]
    fn fresh_grids_satisfy_invariant() {
        assert_encoding_invariant(&random_grid(13, 17, 0.35, 3));
        assert_encoding_invariant(&random_grid(2, 2, 0.5, 3));
    }

    #[test]
    fn translate_wraps() {
        let cells: BTreeSet<_> = [(4, 4)].into_iter().collect();
        let moved = translate(&cells, 1, 2, 5, 5);
        assert!(moved.contains(&(0, 1)));
    }
}
