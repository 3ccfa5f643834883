//! Row-partitioned parallel generation engine.
//!
//! Each generation runs in two exclusive-ownership phases over the same
//! frozen snapshot:
//!
//! 1. **Parallel phase.** The grid buffer is split into one [`RowBand`] per
//!    slice and every worker classifies its slice interior, writing only into
//!    its own band. The rayon scope joins all workers before the phase ends.
//! 2. **Repair phase.** A single thread classifies the halo rows against the
//!    full grid. This touches `2 * workers` rows, not the whole grid.
//!
//! Every cell is classified exactly once per generation and all reads come
//! from the snapshot, so the result is byte-identical to
//! [`SequentialEngine`].
//!
//! [`RowBand`]: gol_core::RowBand

use std::time::Instant;

use gol_core::{Grid, Snapshot};
use rayon::prelude::*;

use crate::backend::GenerationBackend;
use crate::error::EngineError;
use crate::kernel::{self, TransitionCounts};
use crate::metrics::RunMetrics;
use crate::partition::{Parallelism, RowPartition, SequentialReason};
use crate::sequential::SequentialEngine;

/// Parallel engine that slices rows across a dedicated rayon pool.
pub struct PartitionedEngine {
    workers: usize,
    pool: rayon::ThreadPool,
    snapshot: Option<Snapshot>,
    fallback: SequentialEngine,
}

impl PartitionedEngine {
    /// Create an engine with its own pool of `workers` threads.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidWorkerCount`] for zero workers and
    /// [`EngineError::ThreadPool`] if the pool cannot be built.
    pub fn new(workers: usize) -> Result<Self, EngineError> {
        if workers == 0 {
            return Err(EngineError::InvalidWorkerCount { workers });
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("gol-slice-{i}"))
            .build()
            .map_err(|e| EngineError::ThreadPool {
                reason: e.to_string(),
            })?;
        Ok(Self {
            workers,
            pool,
            snapshot: None,
            fallback: SequentialEngine::new(),
        })
    }

    /// Requested worker count.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Advance `grid` by one sliced generation.
    ///
    /// Returns the transitions applied and the microseconds spent repairing
    /// halo rows.
    pub fn step_sliced(&mut self, grid: &mut Grid, partition: &RowPartition) -> (TransitionCounts, u64) {
        debug_assert_eq!(partition.rows(), grid.rows());
        let snapshot = kernel::refresh_snapshot(&mut self.snapshot, grid);

        let bands = grid.band_mut().split_rows(partition.slices());
        let mut counts = self.pool.install(|| {
            bands
                .into_par_iter()
                .enumerate()
                .map(|(k, mut band)| kernel::classify_rows(snapshot, partition.interior(k), &mut band))
                .reduce(TransitionCounts::default, |a, b| a + b)
        });

        let repair_start = Instant::now();
        let mut band = grid.band_mut();
        for row in partition.halo_rows() {
            counts += kernel::classify_rows(snapshot, row..row + 1, &mut band);
        }
        (counts, kernel::elapsed_us(repair_start))
    }

    fn run_fallback(
        &mut self,
        grid: &mut Grid,
        generations: u64,
        reason: SequentialReason,
    ) -> RunMetrics {
        match reason {
            SequentialReason::TooFewRows { rows } => tracing::warn!(
                rows,
                "grid has too few rows for parallel slicing, running sequentially"
            ),
            SequentialReason::SingleWorker => tracing::debug!(
                requested = self.workers,
                "single worker, running sequentially"
            ),
        }
        let start = Instant::now();
        let counts = self.fallback.run_counted(grid, generations);
        RunMetrics {
            generations,
            births: counts.births,
            deaths: counts.deaths,
            workers: 1,
            fell_back: true,
            total_us: kernel::elapsed_us(start),
            repair_us: 0,
        }
    }
}

impl GenerationBackend for PartitionedEngine {
    fn name(&self) -> &str {
        "partitioned"
    }

    fn run(&mut self, grid: &mut Grid, generations: u64) -> Result<RunMetrics, EngineError> {
        if generations == 0 {
            return Ok(RunMetrics::idle(self.workers));
        }
        let partition = match Parallelism::plan(grid.rows(), self.workers) {
            Parallelism::Sequential(reason) => {
                return Ok(self.run_fallback(grid, generations, reason));
            }
            Parallelism::Sliced(partition) => partition,
        };
        if partition.workers() < self.workers {
            tracing::warn!(
                requested = self.workers,
                used = partition.workers(),
                rows = grid.rows(),
                "not enough rows for every worker, reducing parallelism"
            );
        }
        tracing::debug!(slices = ?partition.slices(), "row partition planned");

        let start = Instant::now();
        let mut counts = TransitionCounts::default();
        let mut repair_us = 0;
        for _ in 0..generations {
            let (step, repair) = self.step_sliced(grid, &partition);
            counts += step;
            repair_us += repair;
        }
        let metrics = RunMetrics {
            generations,
            births: counts.births,
            deaths: counts.deaths,
            workers: partition.workers(),
            fell_back: false,
            total_us: kernel::elapsed_us(start),
            repair_us,
        };
        tracing::debug!(
            generations,
            workers = metrics.workers,
            births = metrics.births,
            deaths = metrics.deaths,
            total_us = metrics.total_us,
            repair_us,
            "partitioned run complete"
        );
        Ok(metrics)
    }
}

impl std::fmt::Debug for PartitionedEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartitionedEngine")
            .field("workers", &self.workers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn striped(rows: usize, cols: usize) -> Grid {
        let mut g = Grid::new(rows, cols).unwrap();
        for r in 0..rows {
            for c in 0..cols {
                if (r * 7 + c * 3) % 5 < 2 {
                    g.set_cell(r, c, true);
                }
            }
        }
        g
    }

    #[test]
    fn zero_workers_rejected() {
        assert_eq!(
            PartitionedEngine::new(0).unwrap_err(),
            EngineError::InvalidWorkerCount { workers: 0 }
        );
    }

    #[test]
    fn matches_sequential_on_striped_grid() {
        let start = striped(40, 23);
        let mut seq = start.clone();
        let mut par = start.clone();
        SequentialEngine::new().run(&mut seq, 6).unwrap();
        let metrics = PartitionedEngine::new(4).unwrap().run(&mut par, 6).unwrap();
        assert_eq!(metrics.workers, 4);
        assert!(!metrics.fell_back);
        assert_eq!(par, seq);
    }

    #[test]
    fn small_grid_falls_back() {
        let start = striped(8, 8);
        let mut seq = start.clone();
        let mut par = start.clone();
        SequentialEngine::new().run(&mut seq, 3).unwrap();
        let metrics = PartitionedEngine::new(4).unwrap().run(&mut par, 3).unwrap();
        assert!(metrics.fell_back);
        assert_eq!(metrics.workers, 1);
        assert_eq!(par, seq);
    }

    #[test]
    fn reduced_workers_still_match() {
        let start = striped(11, 17);
        let mut seq = start.clone();
        let mut par = start.clone();
        SequentialEngine::new().run(&mut seq, 5).unwrap();
        let metrics = PartitionedEngine::new(16).unwrap().run(&mut par, 5).unwrap();
        assert_eq!(metrics.workers, 3);
        assert_eq!(par, seq);
    }

    #[test]
    fn step_counts_match_sequential() {
        let start = striped(30, 30);
        let mut seq = start.clone();
        let mut par = start.clone();
        let expected = SequentialEngine::new().step(&mut seq);
        let partition = RowPartition::new(30, 5);
        let (counts, _) = PartitionedEngine::new(5).unwrap().step_sliced(&mut par, &partition);
        assert_eq!(counts, expected);
        assert_eq!(par, seq);
    }
}
