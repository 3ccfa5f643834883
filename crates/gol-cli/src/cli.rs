//! Command-line argument parsing for `gol`.
//!
//! Arguments are parsed by hand: every flag is `--name` or `--name VALUE`.
//! Parsing is pure so it can be tested without touching the process.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use gol_engine::{DevicePreference, EngineMode, DEFAULT_WORKERS};

/// Version reported by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Usage text printed by `--help`.
pub const HELP_TEXT: &str = "\
gol - toroidal Game of Life

USAGE:
    gol --load FILE --generations N [OPTIONS]

OPTIONS:
    --load FILE          Board to start from (required)
    --generations N      Generations to compute, N >= 1 (required)
    --save FILE          Write the final board to FILE
    --verify FILE        Compare the final board with FILE; exit 1 on mismatch
    --mode MODE          Engine: seq (default), openmp|omp, opencl|ocl
    --threads T          Worker threads for openmp (default: 4)
    --device cpu|gpu     Compute device for opencl (default: gpu, else cpu)
    --measure            Print init; kernel; finalise phase times
    --verbose            Log debug detail
    --help, -h           Show this help message
    --version, -V        Show version

BOARD FORMAT:
    First line \"<cols>,<rows>\", then one line per row;
    'x' is alive, '.' is dead.

ENVIRONMENT VARIABLES:
    RUST_LOG             Override the log filter (e.g. gol_engine=debug)";

/// What the command line asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Compute generations.
    Run(Opts),
    /// Print [`HELP_TEXT`].
    Help,
    /// Print the version.
    Version,
}

/// Parsed options for a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Opts {
    /// Input board.
    pub load: PathBuf,
    /// Output board, if any.
    pub save: Option<PathBuf>,
    /// Expected final board, if any.
    pub verify: Option<PathBuf>,
    /// Generations to compute, at least 1.
    pub generations: u64,
    /// Engine and its parameters.
    pub mode: EngineMode,
    /// Print phase timings.
    pub measure: bool,
    /// Debug-level logging.
    pub verbose: bool,
    /// Unrecognised arguments, ignored with a warning.
    pub unknown: Vec<String>,
}

/// Invalid command lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CliError {
    /// A flag that takes a value was last on the line.
    MissingValue {
        /// The flag.
        flag: String,
    },
    /// A flag value could not be parsed or is out of range.
    InvalidValue {
        /// The flag.
        flag: String,
        /// The value as given.
        value: String,
    },
    /// No `--load`.
    MissingLoad,
    /// No `--generations`.
    MissingGenerations,
    /// `--threads` without `--mode openmp`.
    ThreadsWithoutPartitioned,
    /// `--device` without `--mode opencl`.
    DeviceWithoutOffload,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingValue { flag } => write!(f, "missing value after {flag}"),
            Self::InvalidValue { flag, value } => write!(f, "invalid value for {flag}: '{value}'"),
            Self::MissingLoad => write!(f, "please specify a file to --load"),
            Self::MissingGenerations => write!(f, "please specify a --generations count"),
            Self::ThreadsWithoutPartitioned => {
                write!(f, "--threads is only valid with --mode openmp")
            }
            Self::DeviceWithoutOffload => write!(f, "--device is only valid with --mode opencl"),
        }
    }
}

impl Error for CliError {}

/// Parse arguments, excluding the program name.
pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut load = None;
    let mut save = None;
    let mut verify = None;
    let mut generations = None;
    let mut mode_name = String::from("seq");
    let mut threads = None;
    let mut device = None;
    let mut measure = false;
    let mut verbose = false;
    let mut unknown = Vec::new();

    while let Some(arg) = args.next() {
        let mut value = || {
            args.next().ok_or_else(|| CliError::MissingValue { flag: arg.clone() })
        };
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--load" => load = Some(PathBuf::from(value()?)),
            "--save" => save = Some(PathBuf::from(value()?)),
            "--verify" => verify = Some(PathBuf::from(value()?)),
            "--generations" => {
                let v = value()?;
                match v.trim().parse::<u64>() {
                    Ok(n) if n >= 1 => generations = Some(n),
                    _ => return Err(invalid(&arg, v)),
                }
            }
            "--mode" => {
                let v = value()?;
                // Validate now so a bad mode is reported against its flag.
                if v.parse::<EngineMode>().is_err() {
                    return Err(invalid(&arg, v));
                }
                mode_name = v;
            }
            "--threads" => {
                let v = value()?;
                match v.trim().parse::<usize>() {
                    Ok(n) if n >= 1 => threads = Some(n),
                    _ => return Err(invalid(&arg, v)),
                }
            }
            "--device" => {
                let v = value()?;
                match v.as_str() {
                    "cpu" => device = Some(DevicePreference::Cpu),
                    "gpu" => device = Some(DevicePreference::Gpu),
                    _ => return Err(invalid(&arg, v)),
                }
            }
            "--measure" => measure = true,
            "--verbose" => verbose = true,
            _ => unknown.push(arg),
        }
    }

    let load = load.ok_or(CliError::MissingLoad)?;
    let base = mode_name
        .parse::<EngineMode>()
        .map_err(|_| invalid("--mode", mode_name.clone()))?;
    let mode = match base {
        EngineMode::Partitioned { .. } => EngineMode::Partitioned {
            workers: threads.unwrap_or(DEFAULT_WORKERS),
        },
        _ if threads.is_some() => return Err(CliError::ThreadsWithoutPartitioned),
        EngineMode::Offload { .. } => EngineMode::Offload {
            device: device.unwrap_or_default(),
        },
        EngineMode::Sequential => EngineMode::Sequential,
    };
    if device.is_some() && !matches!(mode, EngineMode::Offload { .. }) {
        return Err(CliError::DeviceWithoutOffload);
    }
    let generations = generations.ok_or(CliError::MissingGenerations)?;

    Ok(Command::Run(Opts {
        load,
        save,
        verify,
        generations,
        mode,
        measure,
        verbose,
        unknown,
    }))
}

fn invalid(flag: &str, value: String) -> CliError {
    CliError::InvalidValue {
        flag: flag.to_string(),
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command, CliError> {
        parse_args(line.split_whitespace().map(String::from))
    }

    fn opts(line: &str) -> Opts {
        match parse(line) {
            Ok(Command::Run(opts)) => opts,
            other => panic!("expected run options, got {other:?}"),
        }
    }

    #[test]
    fn minimal_run() {
        let o = opts("--load in.txt --generations 10");
        assert_eq!(o.load, PathBuf::from("in.txt"));
        assert_eq!(o.generations, 10);
        assert_eq!(o.mode, EngineMode::Sequential);
        assert!(o.save.is_none() && o.verify.is_none());
        assert!(!o.measure && !o.verbose);
    }

    #[test]
    fn full_partitioned_run() {
        let o = opts(
            "--load a --save b --verify c --generations 3 --mode OMP --threads 8 --measure --verbose",
        );
        assert_eq!(o.mode, EngineMode::Partitioned { workers: 8 });
        assert_eq!(o.save, Some(PathBuf::from("b")));
        assert_eq!(o.verify, Some(PathBuf::from("c")));
        assert!(o.measure && o.verbose);
    }

    #[test]
    fn threads_may_precede_mode() {
        let o = opts("--threads 2 --load a --generations 1 --mode openmp");
        assert_eq!(o.mode, EngineMode::Partitioned { workers: 2 });
    }

    #[test]
    fn partitioned_defaults_to_four_workers() {
        let o = opts("--load a --generations 1 --mode openmp");
        assert_eq!(o.mode, EngineMode::Partitioned { workers: 4 });
    }

    #[test]
    fn offload_device() {
        let o = opts("--load a --generations 1 --mode ocl --device cpu");
        assert_eq!(
            o.mode,
            EngineMode::Offload {
                device: DevicePreference::Cpu
            }
        );
        let o = opts("--load a --generations 1 --mode opencl");
        assert_eq!(
            o.mode,
            EngineMode::Offload {
                device: DevicePreference::Any
            }
        );
    }

    #[test]
    fn unknown_flags_are_collected() {
        let o = opts("--load a --frobnicate --generations 1");
        assert_eq!(o.unknown, vec!["--frobnicate".to_string()]);
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(parse("--help --load"), Ok(Command::Help));
        assert_eq!(parse("-V"), Ok(Command::Version));
    }

    #[test]
    fn errors() {
        assert_eq!(
            parse("--load"),
            Err(CliError::MissingValue {
                flag: "--load".into()
            })
        );
        assert_eq!(parse("--generations 4"), Err(CliError::MissingLoad));
        assert_eq!(parse("--load a"), Err(CliError::MissingGenerations));
        assert!(matches!(
            parse("--load a --generations 0"),
            Err(CliError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse("--load a --generations 1 --mode cuda"),
            Err(CliError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse("--load a --generations 1 --mode openmp --threads 0"),
            Err(CliError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse("--load a --generations 1 --device tpu"),
            Err(CliError::InvalidValue { .. })
        ));
        assert_eq!(
            parse("--load a --generations 1 --threads 2"),
            Err(CliError::ThreadsWithoutPartitioned)
        );
        assert_eq!(
            parse("--load a --generations 1 --mode seq --device gpu"),
            Err(CliError::DeviceWithoutOffload)
        );
    }

    #[test]
    fn help_text_lists_modes() {
        assert!(HELP_TEXT.contains("openmp"));
        assert!(HELP_TEXT.contains("opencl"));
        assert!(!VERSION.is_empty());
    }
}
