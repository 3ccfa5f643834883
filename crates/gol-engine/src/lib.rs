//! Generation engines for the toroidal Game of Life.
//!
//! Three interchangeable [`GenerationBackend`]s advance a
//! [`Grid`](gol_core::Grid) in place:
//!
//! - [`SequentialEngine`]: one pass over a frozen [`Snapshot`](gol_core::Snapshot),
//!   toggling only the cells that change.
//! - [`PartitionedEngine`]: the same pass split into row slices on a rayon
//!   pool, followed by a serial repair pass over the slice boundary rows.
//! - [`OffloadEngine`]: plain 0/1 buffers on a compute device, ping-ponged
//!   through three kernels and a barrier per generation.
//!
//! All three produce byte-identical grids for the same input.
//! [`EngineConfig`] selects one at runtime.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod backend;
pub mod config;
pub mod error;
pub mod kernel;
pub mod metrics;
pub mod offload;
pub mod partition;
pub mod partitioned;
pub mod sequential;

pub use backend::GenerationBackend;
pub use config::{ConfigError, EngineConfig, EngineMode, DEFAULT_WORKERS};
pub use error::EngineError;
pub use kernel::TransitionCounts;
pub use metrics::RunMetrics;
pub use offload::{DevicePreference, OffloadEngine};
pub use partition::RowPartition;
pub use partitioned::PartitionedEngine;
pub use sequential::SequentialEngine;
