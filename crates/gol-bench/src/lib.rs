//! Benchmark profiles for the Game of Life engines.
//!
//! - [`reference_board`]: 256x256 board (64K cells) at 35% density
//! - [`stress_board`]: 1024x1024 board (~1M cells) at 35% density
//! - [`engine_matrix`]: one configuration per engine worth comparing

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use gol_core::Grid;
use gol_engine::{DevicePreference, EngineMode};
use gol_test_utils::random_grid;

/// Fraction of live cells in the generated boards.
pub const DENSITY: f64 = 0.35;

/// 256x256 board (64K cells).
pub fn reference_board(seed: u64) -> Grid {
    random_grid(256, 256, DENSITY, seed)
}

/// 1024x1024 board (~1M cells).
pub fn stress_board(seed: u64) -> Grid {
    random_grid(1024, 1024, DENSITY, seed)
}

/// Engine modes compared by the `engines` bench, with a short label each.
pub fn engine_matrix() -> Vec<(&'static str, EngineMode)> {
    vec![
        ("sequential", EngineMode::Sequential),
        ("partitioned_2", EngineMode::Partitioned { workers: 2 }),
        ("partitioned_4", EngineMode::Partitioned { workers: 4 }),
        ("partitioned_8", EngineMode::Partitioned { workers: 8 }),
        (
            "offload_cpu",
            EngineMode::Offload {
                device: DevicePreference::Cpu,
            },
        ),
    ]
}
