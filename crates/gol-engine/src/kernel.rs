//! The single-pass classification kernel shared by the CPU engines.

use std::ops::{Add, AddAssign, Range};

use gol_core::cell::{self, Transition};
use gol_core::{Grid, RowBand, Snapshot};

/// Births and deaths applied by one or more kernel passes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransitionCounts {
    /// Dead cells that came alive.
    pub births: u64,
    /// Live cells that died.
    pub deaths: u64,
}

impl Add for TransitionCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            births: self.births + rhs.births,
            deaths: self.deaths + rhs.deaths,
        }
    }
}

impl AddAssign for TransitionCounts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Classify every cell of `rows` in `snapshot` and toggle the ones that
/// change into `band`.
///
/// Reads come only from the snapshot, writes go only to the band, so the
/// result does not depend on the order of the toggles. Every row in `rows`,
/// plus the row above and below it, must be inside `band`.
pub fn classify_rows(
    snapshot: &Snapshot,
    rows: Range<usize>,
    band: &mut RowBand<'_>,
) -> TransitionCounts {
    let mut counts = TransitionCounts::default();
    for row in rows {
        for (col, &packed) in snapshot.row(row).iter().enumerate() {
            // Dead cells with no neighbours dominate most boards.
            if packed == 0 {
                continue;
            }
            match cell::transition(packed) {
                Transition::Stay => {}
                Transition::Birth => {
                    band.birth(row, col);
                    counts.births += 1;
                }
                Transition::Death => {
                    band.death(row, col);
                    counts.deaths += 1;
                }
            }
        }
    }
    counts
}

/// Refresh the snapshot in `slot` from `grid`, allocating it on first use.
pub(crate) fn refresh_snapshot<'s>(slot: &'s mut Option<Snapshot>, grid: &Grid) -> &'s Snapshot {
    if let Some(snapshot) = slot.as_mut() {
        snapshot.refresh(grid);
    }
    slot.get_or_insert_with(|| Snapshot::capture(grid))
}

/// Elapsed microseconds since `start`, saturating.
pub(crate) fn elapsed_us(start: std::time::Instant) -> u64 {
    u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lonely_cell_dies() {
        let mut g = Grid::new(5, 5).unwrap();
        g.set_cell(2, 2, true);
        let snap = Snapshot::capture(&g);
        let counts = classify_rows(&snap, 0..5, &mut g.band_mut());
        assert_eq!(counts, TransitionCounts { births: 0, deaths: 1 });
        assert!(g.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn restricted_rows_only_touch_those_cells() {
        let mut g = Grid::new(6, 6).unwrap();
        // Horizontal blinker on row 2: births land on rows 1 and 3.
        for c in 1..4 {
            g.set_cell(2, c, true);
        }
        let snap = Snapshot::capture(&g);
        let counts = classify_rows(&snap, 1..2, &mut g.band_mut());
        assert_eq!(counts, TransitionCounts { births: 1, deaths: 0 });
        assert!(g.get_cell(1, 2));
        assert!(!g.get_cell(3, 2));
    }

    #[test]
    fn counts_add() {
        let a = TransitionCounts { births: 2, deaths: 1 };
        let mut b = TransitionCounts { births: 1, deaths: 5 };
        b += a;
        assert_eq!(b, TransitionCounts { births: 3, deaths: 6 });
    }
}
