//! Toroidal Game of Life with packed cells and interchangeable engines.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the `gol-*` sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use gol::prelude::*;
//!
//! let mut grid = gol::board::parse("6,6\n......\n..x...\n...x..\n.xxx..\n......\n......\n").unwrap();
//! let mut engine = EngineConfig::new(EngineMode::Partitioned { workers: 2 })
//!     .build()
//!     .unwrap();
//! engine.run(&mut grid, 4).unwrap();
//! // The glider moved one cell down and one to the right.
//! assert!(grid.get_cell(2, 3) && grid.get_cell(3, 4) && grid.get_cell(4, 2));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `gol-core` | Cell codec, `Grid`, `RowBand`, `Snapshot`, `Torus` |
//! | [`engine`] | `gol-engine` | Sequential, partitioned and offload engines |
//! | [`board`] | `gol-board` | Text board loading and saving |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Cell encoding, grid, and snapshots (`gol-core`).
pub use gol_core as types;

/// Generation engines and their configuration (`gol-engine`).
///
/// [`engine::SequentialEngine`], [`engine::PartitionedEngine`] and
/// [`engine::OffloadEngine`] all implement [`engine::GenerationBackend`].
pub use gol_engine as engine;

/// Board text format (`gol-board`).
pub use gol_board as board;

/// Common imports for typical usage.
///
/// ```rust
/// use gol::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use gol_core::{Grid, GridError, RowBand, Snapshot, Torus, Transition};

    // Engines
    pub use gol_engine::{
        ConfigError, DevicePreference, EngineConfig, EngineError, EngineMode, GenerationBackend,
        OffloadEngine, PartitionedEngine, RunMetrics, SequentialEngine,
    };

    // Boards
    pub use gol_board::BoardError;
}
