//! Packed cell codec and the B3/S23 transition table.
//!
//! A cell is one byte: bit 0 is the alive flag and bits 1-4 hold the number
//! of live neighbours times two. Because the neighbour count is stored next
//! to the liveness bit, the Life rule collapses into a lookup on the raw
//! byte value.

/// Alive flag (bit 0).
pub const ALIVE: u8 = 0b0000_0001;

/// Amount one live neighbour adds to the packed byte.
pub const NEIGHBOUR_UNIT: u8 = 2;

/// Largest value a well-formed cell byte can take: alive with 8 neighbours.
pub const MAX_CELL: u8 = ALIVE + 8 * NEIGHBOUR_UNIT;

/// What happens to a cell at the end of the current generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The cell keeps its state.
    Stay,
    /// Dead cell with exactly three live neighbours comes alive.
    Birth,
    /// Live cell with fewer than two or more than three neighbours dies.
    Death,
}

/// Transition for every possible byte value.
///
/// Only `0..=17` are reachable; everything above maps to [`Transition::Stay`]
/// so the table is total and the hot loop needs no bounds check.
static TRANSITIONS: [Transition; 256] = build_table();

const fn build_table() -> [Transition; 256] {
    let mut table = [Transition::Stay; 256];
    let mut value = 0;
    while value <= MAX_CELL as usize {
        let alive = value as u8 & ALIVE != 0;
        let neighbours = value as u8 / NEIGHBOUR_UNIT;
        table[value] = if alive {
            if neighbours == 2 || neighbours == 3 {
                Transition::Stay
            } else {
                Transition::Death
            }
        } else if neighbours == 3 {
            Transition::Birth
        } else {
            Transition::Stay
        };
        value += 1;
    }
    table
}

/// Pack liveness and a neighbour count into a cell byte.
///
/// `neighbours` must be in `0..=8`.
#[inline]
pub const fn encode(alive: bool, neighbours: u8) -> u8 {
    debug_assert!(neighbours <= 8);
    neighbours * NEIGHBOUR_UNIT + alive as u8
}

/// Whether the packed cell is alive.
#[inline]
pub const fn is_alive(cell: u8) -> bool {
    cell & ALIVE != 0
}

/// Number of live neighbours recorded in the packed cell.
#[inline]
pub const fn neighbours(cell: u8) -> u8 {
    cell / NEIGHBOUR_UNIT
}

/// Classify a packed cell under the B3/S23 rule.
#[inline]
pub fn transition(cell: u8) -> Transition {
    TRANSITIONS[cell as usize]
}
