#![forbid(unsafe_code)]

//! `gol`: advance a Game of Life board on a torus.

use std::process::ExitCode;

use gol_cli::cli::{HELP_TEXT, VERSION};
use gol_cli::{execute, parse_args, Command, PhaseTimer};
use tracing_subscriber::fmt::time::Uptime;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_timer(Uptime::default())
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let timer = PhaseTimer::start();
    let opts = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            println!("{HELP_TEXT}");
            return ExitCode::SUCCESS;
        }
        Ok(Command::Version) => {
            println!("gol {VERSION}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            init_logging(false);
            tracing::error!("{e}");
            eprintln!("Run with --help for usage information.");
            return ExitCode::FAILURE;
        }
    };

    init_logging(opts.verbose);
    for arg in &opts.unknown {
        tracing::warn!("unknown command line argument '{arg}'");
    }

    match execute(&opts, timer) {
        Ok(outcome) => {
            if opts.measure {
                println!("{}", outcome.times.measure_line());
            }
            if outcome.success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
