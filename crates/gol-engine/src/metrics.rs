//! Per-run metrics for the generation engines.
//!
//! [`RunMetrics`] captures what a single [`run`](crate::GenerationBackend::run)
//! did: how many generations, how many cells changed, and how the work was
//! scheduled.

/// Counters and timings collected during one `run` call.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Generations advanced.
    pub generations: u64,
    /// Dead-to-alive transitions applied.
    ///
    /// The offload engine only sees the final buffer, so it reports the net
    /// change between the initial and final grid instead of a per-generation
    /// sum.
    pub births: u64,
    /// Alive-to-dead transitions applied (see [`births`](Self::births)).
    pub deaths: u64,
    /// Workers that ran the parallel phase (1 for sequential paths).
    pub workers: usize,
    /// Whether the requested engine handed the run to the sequential one.
    pub fell_back: bool,
    /// Wall-clock time for the whole run.
    pub total_us: u64,
    /// Time spent in the serial boundary repair passes.
    pub repair_us: u64,
}

impl RunMetrics {
    /// Metrics of a run that advanced nothing.
    pub fn idle(workers: usize) -> Self {
        Self {
            workers,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = RunMetrics::default();
        assert_eq!(m.generations, 0);
        assert_eq!(m.births, 0);
        assert_eq!(m.deaths, 0);
        assert_eq!(m.workers, 0);
        assert!(!m.fell_back);
        assert_eq!(m.total_us, 0);
        assert_eq!(m.repair_us, 0);
    }

    #[test]
    fn idle_keeps_worker_count() {
        let m = RunMetrics::idle(4);
        assert_eq!(m.workers, 4);
        assert_eq!(m.generations, 0);
    }
}
