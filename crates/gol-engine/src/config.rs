//! Engine selection, validation, and error types.
//!
//! [`EngineConfig`] names the engine to run and its parameters.
//! [`build()`](EngineConfig::build) validates it and constructs the matching
//! [`GenerationBackend`].

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::backend::GenerationBackend;
use crate::error::EngineError;
use crate::offload::{DevicePreference, OffloadEngine};
use crate::partitioned::PartitionedEngine;
use crate::sequential::SequentialEngine;

/// Worker threads used by the partitioned engine when none are requested.
pub const DEFAULT_WORKERS: usize = 4;

// ── EngineMode ─────────────────────────────────────────────────────

/// Which engine advances the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EngineMode {
    /// Single-threaded full-grid pass.
    #[default]
    Sequential,
    /// Row slices on a rayon pool.
    Partitioned {
        /// Requested worker threads. Reduced for short grids.
        workers: usize,
    },
    /// Compute device with ping-pong buffers.
    Offload {
        /// Requested device.
        device: DevicePreference,
    },
}

impl EngineMode {
    /// Short mode name as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sequential => "seq",
            Self::Partitioned { .. } => "openmp",
            Self::Offload { .. } => "opencl",
        }
    }
}

impl FromStr for EngineMode {
    type Err = ConfigError;

    /// Parse a mode name, case-insensitively.
    ///
    /// `seq`, `openmp` (or `omp`) and `opencl` (or `ocl`) are accepted.
    /// Parameters take their defaults.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "seq" | "sequential" => Ok(Self::Sequential),
            "openmp" | "omp" => Ok(Self::Partitioned {
                workers: DEFAULT_WORKERS,
            }),
            "opencl" | "ocl" => Ok(Self::Offload {
                device: DevicePreference::Any,
            }),
            _ => Err(ConfigError::UnknownMode {
                mode: s.to_string(),
            }),
        }
    }
}

// ── EngineConfig ───────────────────────────────────────────────────

/// Everything needed to construct a generation engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// The engine and its parameters.
    pub mode: EngineMode,
}

impl EngineConfig {
    /// Configuration for `mode`.
    pub fn new(mode: EngineMode) -> Self {
        Self { mode }
    }

    /// Check the configuration without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let EngineMode::Partitioned { workers: 0 } = self.mode {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }

    /// Validate and construct the configured engine.
    pub fn build(&self) -> Result<Box<dyn GenerationBackend>, ConfigError> {
        self.validate()?;
        let backend: Box<dyn GenerationBackend> = match self.mode {
            EngineMode::Sequential => Box::new(SequentialEngine::new()),
            EngineMode::Partitioned { workers } => Box::new(PartitionedEngine::new(workers)?),
            EngineMode::Offload { device } => Box::new(OffloadEngine::new(device)),
        };
        tracing::debug!(engine = backend.name(), mode = ?self.mode, "engine built");
        Ok(backend)
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while selecting or building an engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The mode name is not recognised.
    UnknownMode {
        /// The name as given.
        mode: String,
    },
    /// The partitioned engine was asked for zero workers.
    ZeroWorkers,
    /// Engine construction failed.
    Engine(EngineError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownMode { mode } => {
                write!(f, "unknown mode '{mode}', expected seq, openmp or opencl")
            }
            Self::ZeroWorkers => write!(f, "worker count must be at least 1"),
            Self::Engine(e) => write!(f, "engine construction failed: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EngineError> for ConfigError {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names_parse() {
        assert_eq!("seq".parse::<EngineMode>(), Ok(EngineMode::Sequential));
        assert_eq!(
            "OMP".parse::<EngineMode>(),
            Ok(EngineMode::Partitioned {
                workers: DEFAULT_WORKERS
            })
        );
        assert_eq!(
            "OpenCL".parse::<EngineMode>(),
            Ok(EngineMode::Offload {
                device: DevicePreference::Any
            })
        );
        assert_eq!(
            "cuda".parse::<EngineMode>(),
            Err(ConfigError::UnknownMode {
                mode: "cuda".into()
            })
        );
    }

    #[test]
    fn zero_workers_rejected() {
        let cfg = EngineConfig::new(EngineMode::Partitioned { workers: 0 });
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroWorkers));
        assert!(cfg.build().is_err());
    }

    #[test]
    fn build_selects_engine() {
        let cases = [
            (EngineMode::Sequential, "sequential"),
            (EngineMode::Partitioned { workers: 2 }, "partitioned"),
            (
                EngineMode::Offload {
                    device: DevicePreference::Cpu,
                },
                "offload",
            ),
        ];
        for (mode, name) in cases {
            let backend = EngineConfig::new(mode).build().unwrap();
            assert_eq!(backend.name(), name);
        }
    }

    #[test]
    fn engine_error_is_source() {
        let err = ConfigError::from(EngineError::DeviceLost);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("disconnected"));
    }
}
