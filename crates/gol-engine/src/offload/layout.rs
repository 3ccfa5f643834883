//! Work decomposition for the offload kernels.
//!
//! The grid is covered by three kernels:
//!
//! ```text
//!        col 0   groups of `group_size` columns      right border
//!        ┌───┬──────────┬──────────┬─────────────┬──────────┐
//! row 0  │ C │                 up/down kernel               │
//!        ├───┼──────────┼──────────┼─────────────┼──────────┤
//!        │ o │  group   │  group   │     ...     │ column   │
//!        │ l │  kernel  │  kernel  │             │ kernel   │
//!        ├───┼──────────┼──────────┼─────────────┼──────────┤
//! row R-1│ C │                 up/down kernel               │
//!        └───┴──────────┴──────────┴─────────────┴──────────┘
//! ```
//!
//! The group kernel never wraps, so it can use direct offsets; only the
//! thin border strips pay for wrap-around arithmetic.

use gol_core::Torus;

/// Grids with fewer rows or columns than this are not offloaded.
pub const MIN_OFFLOAD_DIM: usize = 5;

/// Column group width used for grids narrower than 50 columns.
const NARROW_GROUP_SIZE: usize = 3;

/// Pick the column group width for a grid with `cols` columns.
///
/// Wide grids try widths 15 through 24 and keep the one leaving the fewest
/// border columns, preferring the larger width on ties.
pub fn choose_group_size(cols: usize) -> usize {
    if cols < 50 {
        return NARROW_GROUP_SIZE;
    }
    let span = cols - 2;
    let mut best = 15;
    let mut best_leftover = span % best;
    for width in 16..=24 {
        let leftover = span % width;
        if leftover <= best_leftover {
            best = width;
            best_leftover = leftover;
        }
    }
    best
}

/// How one generation is split across the kernels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KernelLayout {
    torus: Torus,
    group_size: usize,
    groups_per_row: usize,
    border_columns: Vec<usize>,
}

impl KernelLayout {
    /// Plan the kernels for a grid with the given topology.
    ///
    /// Both dimensions must be at least [`MIN_OFFLOAD_DIM`].
    pub fn new(torus: Torus) -> Self {
        let cols = torus.cols();
        debug_assert!(torus.rows() >= MIN_OFFLOAD_DIM && cols >= MIN_OFFLOAD_DIM);
        let group_size = choose_group_size(cols);
        let groups_per_row = (cols - 2) / group_size;
        let covered_end = 1 + groups_per_row * group_size;
        let border_columns = std::iter::once(0).chain(covered_end..cols).collect();
        Self {
            torus,
            group_size,
            groups_per_row,
            border_columns,
        }
    }

    /// Grid topology.
    pub fn torus(&self) -> Torus {
        self.torus
    }

    /// Rows in the grid.
    pub fn rows(&self) -> usize {
        self.torus.rows()
    }

    /// Columns in the grid.
    pub fn cols(&self) -> usize {
        self.torus.cols()
    }

    /// Width of one column group.
    pub fn group_size(&self) -> usize {
        self.group_size
    }

    /// Column groups per interior row.
    pub fn groups_per_row(&self) -> usize {
        self.groups_per_row
    }

    /// Work items of the group kernel: one per (interior row, group).
    pub fn group_work_items(&self) -> usize {
        self.groups_per_row * (self.rows() - 2)
    }

    /// Work items of the up/down kernel: every column of the first and last row.
    pub fn updown_work_items(&self) -> usize {
        self.cols() * 2
    }

    /// Columns covered by column group `group`.
    pub fn group_columns(&self, group: usize) -> std::ops::Range<usize> {
        let start = 1 + group * self.group_size;
        start..start + self.group_size
    }

    /// Columns not covered by any group: column 0 and the right border.
    pub fn border_columns(&self) -> &[usize] {
        &self.border_columns
    }
}
