//! Offload generation engine.
//!
//! The packed grid is reduced to plain 0/1 bytes and uploaded to a compute
//! device once per run. Every generation enqueues the group kernel, the
//! up/down kernel, one column kernel per border column and a barrier that
//! swaps the ping-pong buffers. The final buffer is read back and written
//! into the packed grid with [`Grid::set_cell`], which rebuilds the
//! neighbour counts.

mod device;
pub mod kernels;
pub mod layout;

use std::time::Instant;

use gol_core::cell::ALIVE;
use gol_core::Grid;

pub use device::{discover, select, Device, DeviceInfo, DeviceKind, DevicePreference, Kernel};
pub use layout::{KernelLayout, MIN_OFFLOAD_DIM};

use crate::backend::GenerationBackend;
use crate::error::EngineError;
use crate::kernel::{self, TransitionCounts};
use crate::metrics::RunMetrics;
use crate::sequential::SequentialEngine;

/// Engine that runs generations on a compute device.
#[derive(Debug, Default)]
pub struct OffloadEngine {
    preference: DevicePreference,
    fallback: SequentialEngine,
}

impl OffloadEngine {
    /// Create an engine that will ask for `preference` on every run.
    pub fn new(preference: DevicePreference) -> Self {
        Self {
            preference,
            fallback: SequentialEngine::new(),
        }
    }

    /// Requested device.
    pub fn preference(&self) -> DevicePreference {
        self.preference
    }

    fn run_fallback(&mut self, grid: &mut Grid, generations: u64) -> RunMetrics {
        tracing::warn!(
            rows = grid.rows(),
            cols = grid.cols(),
            min = MIN_OFFLOAD_DIM,
            "grid too small to offload, running sequentially"
        );
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

/// Write 0/1 `cells` into the packed `grid`, returning the net transitions.
fn write_back(grid: &mut Grid, cells: &[u8]) -> TransitionCounts {
    let cols = grid.cols();
    let mut counts = TransitionCounts::default();
    for (i, &cell) in cells.iter().enumerate() {
        let (row, col) = (i / cols, i % cols);
        let alive = cell != 0;
        if alive == grid.get_cell(row, col) {
            continue;
        }
        grid.set_cell(row, col, alive);
        if alive {
            counts.births += 1;
        } else {
            counts.deaths += 1;
        }
    }
    counts
}

impl GenerationBackend for OffloadEngine {
    fn name(&self) -> &str {
        "offload"
    }

    fn run(&mut self, grid: &mut Grid, generations: u64) -> Result<RunMetrics, EngineError> {
        if generations == 0 {
            return Ok(RunMetrics::idle(1));
        }
        if grid.rows() < MIN_OFFLOAD_DIM || grid.cols() < MIN_OFFLOAD_DIM {
            return Ok(self.run_fallback(grid, generations));
        }

        let info = select(self.preference);
        tracing::info!(
            device = %info.name,
            kind = %info.kind,
            compute_units = info.compute_units,
            "offload device selected"
        );
        let compute_units = info.compute_units;
        let layout = KernelLayout::new(grid.torus());
        tracing::debug!(
            group_size = layout.group_size(),
            groups_per_row = layout.groups_per_row(),
            border_columns = layout.border_columns().len(),
            "kernel layout planned"
        );
        let border = layout.border_columns().to_vec();

        let start = Instant::now();
        let device = Device::open(info, layout)?;
        device.upload(grid.cells().iter().map(|&c| c & ALIVE).collect())?;
        for _ in 0..generations {
            device.launch(Kernel::Group)?;
            device.launch(Kernel::UpDown)?;
            for &col in &border {
                device.launch(Kernel::Column(col))?;
            }
            device.barrier()?;
        }
        let result = device.read_back()?;
        drop(device);

        let counts = write_back(grid, &result);
        let metrics = RunMetrics {
            generations,
            births: counts.births,
            deaths: counts.deaths,
            workers: compute_units,
            fell_back: false,
            total_us: kernel::elapsed_us(start),
            repair_us: 0,
        };
        tracing::debug!(
            generations,
            births = metrics.births,
            deaths = metrics.deaths,
            total_us = metrics.total_us,
            "offload run complete"
        );
        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glider(rows: usize, cols: usize) -> Grid {
        let mut g = Grid::new(rows, cols).unwrap();
        for (r, c) in [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)] {
            g.set_cell(r, c, true);
        }
        g
    }

    #[test]
    fn matches_sequential() {
        let start = glider(12, 60);
        let mut seq = start.clone();
        let mut off = start.clone();
        SequentialEngine::new().run(&mut seq, 9).unwrap();
        let metrics = OffloadEngine::new(DevicePreference::Cpu)
            .run(&mut off, 9)
            .unwrap();
        assert!(!metrics.fell_back);
        assert_eq!(off, seq);
    }

    #[test]
    fn small_grid_falls_back() {
        let start = glider(4, 8);
        let mut seq = start.clone();
        let mut off = start.clone();
        SequentialEngine::new().run(&mut seq, 3).unwrap();
        let metrics = OffloadEngine::default().run(&mut off, 3).unwrap();
        assert!(metrics.fell_back);
        assert_eq!(off, seq);
    }

    #[test]
    fn net_transitions_are_reported() {
        // A blinker after one generation: two cells died, two were born.
        let mut g = Grid::new(6, 6).unwrap();
        for c in 1..4 {
            g.set_cell(2, c, true);
        }
        let metrics = OffloadEngine::new(DevicePreference::Gpu)
            .run(&mut g, 1)
            .unwrap();
        assert_eq!((metrics.births, metrics.deaths), (2, 2));
        // After two generations the board is back where it started.
        let metrics = OffloadEngine::default().run(&mut g, 1).unwrap();
        assert_eq!((metrics.births, metrics.deaths), (2, 2));
    }

    #[test]
    fn zero_generations_is_noop() {
        let start = glider(10, 10);
        let mut g = start.clone();
        let metrics = OffloadEngine::default().run(&mut g, 0).unwrap();
        assert_eq!(g, start);
        assert_eq!(metrics.generations, 0);
    }
}
