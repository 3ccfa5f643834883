//! Reusable board fixtures.
//!
//! Patterns are lists of live `(row, col)` offsets anchored at their
//! top-left corner. [`place`] stamps one onto a grid with wrap-around.

use gol_core::Grid;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Glider heading down and to the right (+1 row, +1 col every 4 generations).
pub const GLIDER: &[(usize, usize)] = &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];

/// 2x2 still life.
pub const BLOCK: &[(usize, usize)] = &[(0, 0), (0, 1), (1, 0), (1, 1)];

/// Period-2 oscillator, horizontal phase.
pub const BLINKER: &[(usize, usize)] = &[(0, 0), (0, 1), (0, 2)];

/// Six-cell still life.
pub const BEEHIVE: &[(usize, usize)] = &[(0, 1), (0, 2), (1, 0), (1, 3), (2, 1), (2, 2)];

/// Set the cells of `pattern` alive with its top-left corner at `(row, col)`.
///
/// Offsets wrap around the grid edges.
pub fn place(grid: &mut Grid, pattern: &[(usize, usize)], row: usize, col: usize) {
    let (rows, cols) = (grid.rows(), grid.cols());
    for &(dr, dc) in pattern {
        grid.set_cell((row + dr) % rows, (col + dc) % cols, true);
    }
}

/// An empty `rows x cols` grid with `pattern` placed at `(row, col)`.
///
/// # Panics
///
/// Panics on zero dimensions.
pub fn grid_with(rows: usize, cols: usize, pattern: &[(usize, usize)], row: usize, col: usize) -> Grid {
    let mut grid = Grid::new(rows, cols).expect("fixture dimensions must be non-zero");
    place(&mut grid, pattern, row, col);
    grid
}

/// A reproducible random grid where each cell is alive with probability
/// `density`.
///
/// # Panics
///
/// Panics on zero dimensions.
pub fn random_grid(rows: usize, cols: usize, density: f64, seed: u64) -> Grid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut grid = Grid::new(rows, cols).expect("fixture dimensions must be non-zero");
    for row in 0..rows {
        for col in 0..cols {
            // 53 random bits give a uniform f64 in [0, 1).
            let sample = (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
            if sample < density {
                grid.set_cell(row, col, true);
            }
        }
    }
    grid
}
