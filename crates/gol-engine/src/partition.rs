//! Row slicing for the partitioned engine.
//!
//! The rows of the grid are cut into `workers` contiguous slices. The first
//! and last row of every slice are *halo* rows; everything between them is
//! the slice *interior*.
//!
//! ```text
//! row  0  ┐ halo      ← wraps onto the last row of the last slice
//! row  1  │ interior
//! row  2  │ interior
//! row  3  ┘ halo
//! row  4  ┐ halo
//! row  5  │ interior
//! ...
//! ```
//!
//! A toggle on row `r` writes rows `r-1..=r+1`. An interior row's toggles
//! therefore stay inside its own slice, so slices can be processed in
//! parallel over disjoint buffers. Halo rows are the ones whose toggles
//! cross a slice boundary (including the wrap from the last row to row 0);
//! they are handled afterwards in a serial repair pass.

use std::ops::Range;

/// Grids with fewer rows than this always run sequentially.
pub const MIN_PARALLEL_ROWS: usize = 10;

/// Largest worker count worth using for `rows` rows.
///
/// Each slice gets at least three rows so that it has a non-empty
/// interior, and two rows are held back for the wrap boundary.
pub fn max_workers(rows: usize) -> usize {
    rows.saturating_sub(2) / 3
}

/// Why a run will not use the sliced path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequentialReason {
    /// The grid has fewer than [`MIN_PARALLEL_ROWS`] rows.
    TooFewRows {
        /// Rows in the grid.
        rows: usize,
    },
    /// Only one worker was requested or fits.
    SingleWorker,
}

/// Outcome of planning a run for a given grid height and worker request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Parallelism {
    /// Run the sequential kernel over the whole grid.
    Sequential(SequentialReason),
    /// Run sliced with the given partition.
    Sliced(RowPartition),
}

impl Parallelism {
    /// Plan a run over `rows` rows with up to `requested` workers.
    ///
    /// The worker count is reduced to [`max_workers`] when the grid is too
    /// short to give every worker a slice with an interior.
    pub fn plan(rows: usize, requested: usize) -> Self {
        if rows < MIN_PARALLEL_ROWS {
            return Self::Sequential(SequentialReason::TooFewRows { rows });
        }
        let workers = requested.min(max_workers(rows));
        if workers <= 1 {
            return Self::Sequential(SequentialReason::SingleWorker);
        }
        Self::Sliced(RowPartition::new(rows, workers))
    }
}

/// Contiguous row slices, one per worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowPartition {
    rows: usize,
    slices: Vec<Range<usize>>,
}

impl RowPartition {
    /// Split `rows` rows into `workers` slices whose sizes differ by at most one.
    ///
    /// # Panics
    ///
    /// Panics if `workers` is zero or exceeds `rows`.
    pub fn new(rows: usize, workers: usize) -> Self {
        assert!(
            workers >= 1 && workers <= rows,
            "cannot split {rows} rows into {workers} slices"
        );
        let base = rows / workers;
        let extra = rows % workers;
        let mut slices = Vec::with_capacity(workers);
        let mut start = 0;
        for k in 0..workers {
            let len = base + usize::from(k < extra);
            slices.push(start..start + len);
            start += len;
        }
        Self { rows, slices }
    }

    /// Total rows covered.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of slices (= workers).
    pub fn workers(&self) -> usize {
        self.slices.len()
    }

    /// All slices in ascending row order.
    pub fn slices(&self) -> &[Range<usize>] {
        &self.slices
    }

    /// Interior rows of slice `k`: the slice minus its first and last row.
    pub fn interior(&self, k: usize) -> Range<usize> {
        let s = &self.slices[k];
        if s.len() < 2 {
            return s.end..s.end;
        }
        s.start + 1..s.end - 1
    }

    /// Halo rows of every slice, ascending, each row once.
    pub fn halo_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.slices.iter().flat_map(|s| {
            let last = s.end - 1;
            let first = s.start;
            std::iter::once(first).chain((last != first).then_some(last))
        })
    }
}
