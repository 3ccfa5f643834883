//! Single-threaded generation engine.

use std::time::Instant;

use gol_core::{Grid, Snapshot};

use crate::backend::GenerationBackend;
use crate::error::EngineError;
use crate::kernel::{self, TransitionCounts};
use crate::metrics::RunMetrics;

/// Advances the grid with one full-grid kernel pass per generation.
///
/// The snapshot buffer is kept between generations and between runs, so a
/// long run performs one allocation up front and a `memcpy` per generation.
#[derive(Debug, Default)]
pub struct SequentialEngine {
    snapshot: Option<Snapshot>,
}

impl SequentialEngine {
    /// Create an engine with no snapshot allocated yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance `grid` by one generation and report the transitions applied.
    pub fn step(&mut self, grid: &mut Grid) -> TransitionCounts {
        let snapshot = kernel::refresh_snapshot(&mut self.snapshot, grid);
        kernel::classify_rows(snapshot, 0..grid.rows(), &mut grid.band_mut())
    }

    /// Run `generations` generations, returning the summed transitions.
    pub(crate) fn run_counted(&mut self, grid: &mut Grid, generations: u64) -> TransitionCounts {
        let mut total = TransitionCounts::default();
        for _ in 0..generations {
            total += self.step(grid);
        }
        total
    }
}

impl GenerationBackend for SequentialEngine {
    fn name(&self) -> &str {
        "sequential"
    }

    fn run(&mut self, grid: &mut Grid, generations: u64) -> Result<RunMetrics, EngineError> {
        if generations == 0 {
            return Ok(RunMetrics::idle(1));
        }
        let start = Instant::now();
        let counts = self.run_counted(grid, generations);
        let metrics = RunMetrics {
            generations,
            births: counts.births,
            deaths: counts.deaths,
            workers: 1,
            fell_back: false,
            total_us: kernel::elapsed_us(start),
            repair_us: 0,
        };
        tracing::debug!(
            generations,
            births = metrics.births,
            deaths = metrics.deaths,
            total_us = metrics.total_us,
            "sequential run complete"
        );
        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blinker() -> Grid {
        let mut g = Grid::new(5, 5).unwrap();
        for c in 1..4 {
            g.set_cell(2, c, true);
        }
        g
    }

    #[test]
    fn blinker_oscillates() {
        let start = blinker();
        let mut g = start.clone();
        let mut engine = SequentialEngine::new();
        let counts = engine.step(&mut g);
        assert_eq!(counts, TransitionCounts { births: 2, deaths: 2 });
        let live: Vec<_> = g.live_cells().collect();
        assert_eq!(live, vec![(1, 2), (2, 2), (3, 2)]);
        engine.step(&mut g);
        assert_eq!(g, start);
    }

    #[test]
    fn zero_generations_is_noop() {
        let start = blinker();
        let mut g = start.clone();
        let metrics = SequentialEngine::new().run(&mut g, 0).unwrap();
        assert_eq!(g, start);
        assert_eq!(metrics.generations, 0);
    }

    #[test]
    fn run_reports_counts() {
        let mut g = blinker();
        let metrics = SequentialEngine::new().run(&mut g, 3).unwrap();
        assert_eq!(metrics.generations, 3);
        assert_eq!(metrics.births, 6);
        assert_eq!(metrics.deaths, 6);
        assert_eq!(metrics.workers, 1);
    }

    #[test]
    fn snapshot_survives_resized_grids() {
        let mut engine = SequentialEngine::new();
        let mut small = blinker();
        engine.step(&mut small);
        let mut big = Grid::new(8, 9).unwrap();
        for c in 3..6 {
            big.set_cell(4, c, true);
        }
        engine.step(&mut big);
        let live: Vec<_> = big.live_cells().collect();
        assert_eq!(live, vec![(3, 4), (4, 4), (5, 4)]);
    }
}
