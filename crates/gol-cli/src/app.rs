//! The load, run, verify, save pipeline behind `gol`.

use std::error::Error;
use std::fmt;

use gol_board::BoardError;
use gol_core::Grid;
use gol_engine::{ConfigError, EngineConfig, EngineError, RunMetrics};

use crate::cli::Opts;
use crate::timing::{PhaseTimer, PhaseTimes};

/// Fatal failures of a run.
#[derive(Debug)]
pub enum AppError {
    /// Loading or saving a board failed.
    Board(BoardError),
    /// The engine could not be built.
    Config(ConfigError),
    /// The engine failed mid-run.
    Engine(EngineError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Board(e) => write!(f, "board: {e}"),
            Self::Config(e) => write!(f, "configuration: {e}"),
            Self::Engine(e) => write!(f, "engine: {e}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Board(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Engine(e) => Some(e),
        }
    }
}

impl From<BoardError> for AppError {
    fn from(e: BoardError) -> Self {
        Self::Board(e)
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<EngineError> for AppError {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}

/// What a completed run produced.
#[derive(Clone, Debug)]
pub struct Outcome {
    /// The final board.
    pub grid: Grid,
    /// Engine counters.
    pub metrics: RunMetrics,
    /// `Some(matched)` when `--verify` was given.
    pub verified: Option<bool>,
    /// Phase durations.
    pub times: PhaseTimes,
}

impl Outcome {
    /// Whether the process should exit successfully.
    pub fn success(&self) -> bool {
        self.verified != Some(false)
    }
}

/// Execute `opts`. The init phase of `timer` should already be running.
///
/// A verification mismatch is not an error: it is reported in
/// [`Outcome::verified`] and the board is still saved.
pub fn execute(opts: &Opts, mut timer: PhaseTimer) -> Result<Outcome, AppError> {
    let mut grid = gol_board::load(&opts.load)?;
    tracing::info!(
        path = %opts.load.display(),
        cols = grid.cols(),
        rows = grid.rows(),
        "board loaded"
    );
    let expected = opts.verify.as_ref().map(gol_board::load).transpose()?;
    let mut engine = EngineConfig::new(opts.mode).build()?;

    timer.begin_kernel();
    let metrics = engine.run(&mut grid, opts.generations)?;
    tracing::debug!(
        engine = engine.name(),
        generations = metrics.generations,
        births = metrics.births,
        deaths = metrics.deaths,
        workers = metrics.workers,
        fell_back = metrics.fell_back,
        total_us = metrics.total_us,
        repair_us = metrics.repair_us,
        "run finished"
    );

    timer.begin_finalise();
    let verified = expected.map(|expected| {
        let same = grid == expected;
        if same {
            tracing::info!("verification successful");
        } else {
            tracing::error!("verification failed: boards not equal");
        }
        same
    });
    if let Some(path) = &opts.save {
        gol_board::save(&grid, path)?;
        tracing::info!(path = %path.display(), "board saved");
    }

    Ok(Outcome {
        grid,
        metrics,
        verified,
        times: timer.finish(),
    })
}
