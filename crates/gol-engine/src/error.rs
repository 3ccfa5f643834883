//! Engine error types.

use std::error::Error;
use std::fmt;

/// Errors from constructing or running a generation engine.
///
/// Generations are deterministic and local, so none of these are retried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// A worker count of zero was requested.
    InvalidWorkerCount {
        /// The requested count.
        workers: usize,
    },
    /// The rayon thread pool could not be built.
    ThreadPool {
        /// Description from the pool builder.
        reason: String,
    },
    /// A device thread could not be spawned.
    DeviceSpawn {
        /// Description from the OS.
        reason: String,
    },
    /// The device queue hung up before the run completed.
    DeviceLost,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWorkerCount { workers } => {
                write!(f, "worker count must be at least 1, got {workers}")
            }
            Self::ThreadPool { reason } => write!(f, "thread pool build failed: {reason}"),
            Self::DeviceSpawn { reason } => write!(f, "device thread spawn failed: {reason}"),
            Self::DeviceLost => write!(f, "compute device disconnected mid-run"),
        }
    }
}

impl Error for EngineError {}
