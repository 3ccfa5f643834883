//! Phase timing for `--measure`.

use std::time::{Duration, Instant};

/// Format `d` as `HH:MM:SS.mmm`.
///
/// Milliseconds are rounded to nearest but never carry into the seconds
/// field, so `1.9996s` prints as `00:00:01.999`.
pub fn format_duration(d: Duration) -> String {
    let total = d.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total / 60) % 60, total % 60);
    let millis = ((d.subsec_nanos() + 500_000) / 1_000_000).min(999);
    format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
}

/// Records the boundaries between the init, kernel and finalise phases.
#[derive(Clone, Copy, Debug)]
pub struct PhaseTimer {
    start: Instant,
    kernel: Option<Instant>,
    finalise: Option<Instant>,
}

/// Durations of the three phases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhaseTimes {
    /// Argument parsing and board loading.
    pub init: Duration,
    /// Generation computation.
    pub kernel: Duration,
    /// Verification and saving.
    pub finalise: Duration,
}

impl PhaseTimer {
    /// Start timing the init phase now.
    pub fn start() -> Self {
        Self::started_at(Instant::now())
    }

    /// Start timing the init phase at `start`.
    pub fn started_at(start: Instant) -> Self {
        Self {
            start,
            kernel: None,
            finalise: None,
        }
    }

    /// End init, start kernel.
    pub fn begin_kernel(&mut self) {
        self.kernel = Some(Instant::now());
    }

    /// End kernel, start finalise.
    pub fn begin_finalise(&mut self) {
        self.finalise = Some(Instant::now());
    }

    /// Close the finalise phase now.
    ///
    /// Phases that were never begun are reported as zero-length.
    pub fn finish(&self) -> PhaseTimes {
        self.finish_at(Instant::now())
    }

    fn finish_at(&self, end: Instant) -> PhaseTimes {
        let kernel = self.kernel.unwrap_or(end);
        let finalise = self.finalise.unwrap_or(end).max(kernel);
        PhaseTimes {
            init: kernel.saturating_duration_since(self.start),
            kernel: finalise.saturating_duration_since(kernel),
            finalise: end.saturating_duration_since(finalise),
        }
    }
}

impl PhaseTimes {
    /// The `--measure` output line: `init; kernel; finalise;`.
    pub fn measure_line(&self) -> String {
        format!(
            "{}; {}; {};",
            format_duration(self.init),
            format_duration(self.kernel),
            format_duration(self.finalise)
        )
    }
}
