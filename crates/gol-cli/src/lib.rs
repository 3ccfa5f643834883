//! Library half of the `gol` command-line tool.
//!
//! [`cli`] turns arguments into [`cli::Command`]s, [`app`] runs the
//! load, compute, verify and save pipeline, and [`timing`] measures it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod timing;

pub use app::{execute, AppError, Outcome};
pub use cli::{parse_args, CliError, Command, Opts};
pub use timing::{format_duration, PhaseTimer, PhaseTimes};
