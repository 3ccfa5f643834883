//! The capability every generation engine provides.

use gol_core::Grid;

use crate::error::EngineError;
use crate::metrics::RunMetrics;

/// Advances a [`Grid`] by whole generations.
///
/// Implementations take exclusive ownership of the grid for the duration of
/// a call and leave it in a fully consistent state (every neighbour count
/// correct) when they return `Ok`. Generations are strictly sequential: no
/// generation starts reading before the previous one's writes are complete.
///
/// Selection between implementations is a configuration choice, see
/// [`EngineConfig`](crate::EngineConfig).
pub trait GenerationBackend: Send {
    /// Short human-readable engine name, used in logs.
    fn name(&self) -> &str;

    /// Advance `grid` by exactly `generations` generations.
    ///
    /// `generations == 0` leaves the grid untouched.
    fn run(&mut self, grid: &mut Grid, generations: u64) -> Result<RunMetrics, EngineError>;

    /// Advance `grid` by one generation.
    fn advance(&mut self, grid: &mut Grid) -> Result<RunMetrics, EngineError> {
        self.run(grid, 1)
    }
}

impl std::fmt::Debug for dyn GenerationBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationBackend")
            .field("name", &self.name())
            .finish()
    }
}
