//! Device kernels over plain 0/1 cell buffers.
//!
//! Each kernel reads the front buffer and writes the back buffer of the
//! device. Together they write every cell exactly once per generation.

use rayon::prelude::*;

use super::layout::KernelLayout;

/// Conway's B3/S23 rule on an unpacked cell.
#[inline]
pub fn next_state(alive: u8, neighbours: u8) -> u8 {
    u8::from(neighbours == 3 || (alive != 0 && neighbours == 2))
}

/// Next state of `(row, col)` using toroidal wrap for every neighbour.
#[inline]
fn wrapped_next(layout: &KernelLayout, src: &[u8], row: usize, col: usize) -> u8 {
    let torus = layout.torus();
    let neighbours: u8 = torus
        .neighbour_indices(row, col)
        .iter()
        .map(|&i| src[i])
        .sum();
    next_state(src[torus.index(row, col)], neighbours)
}

/// Interior rows, column groups only. No wrap-around: every neighbour of
/// a group cell lies inside the grid at a direct offset.
pub fn group_kernel(layout: &KernelLayout, src: &[u8], dst: &mut [u8]) {
    let cols = layout.cols();
    let rows = layout.rows();
    dst.par_chunks_mut(cols)
        .enumerate()
        .skip(1)
        .take(rows - 2)
        .for_each(|(row, out)| {
            let up = &src[(row - 1) * cols..row * cols];
            let mid = &src[row * cols..(row + 1) * cols];
            let down = &src[(row + 1) * cols..(row + 2) * cols];
            for group in 0..layout.groups_per_row() {
                for c in layout.group_columns(group) {
                    let n = up[c - 1]
                        + up[c]
                        + up[c + 1]
                        + mid[c - 1]
                        + mid[c + 1]
                        + down[c - 1]
                        + down[c]
                        + down[c + 1];
                    out[c] = next_state(mid[c], n);
                }
            }
        });
}

/// First and last row, every column, with wrap-around.
pub fn updown_kernel(layout: &KernelLayout, src: &[u8], dst: &mut [u8]) {
    let last = layout.rows() - 1;
    for row in [0, last] {
        for col in 0..layout.cols() {
            dst[row * layout.cols() + col] = wrapped_next(layout, src, row, col);
        }
    }
}

/// One border column over the interior rows, with wrap-around.
///
/// Rows 0 and `rows - 1` belong to [`updown_kernel`].
pub fn column_kernel(layout: &KernelLayout, col: usize, src: &[u8], dst: &mut [u8]) {
    for row in 1..layout.rows() - 1 {
        dst[row * layout.cols() + col] = wrapped_next(layout, src, row, col);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gol_core::Torus;

    fn naive_next(torus: Torus, src: &[u8]) -> Vec<u8> {
        let mut out = vec![0; src.len()];
        for r in 0..torus.rows() {
            for c in 0..torus.cols() {
                let mut n = 0;
                for dr in [-1isize, 0, 1] {
                    for dc in [-1isize, 0, 1] {
                        if dr == 0 && dc == 0 {
                            continue;
                        }
                        let rr = torus.wrap_row(r as isize + dr);
                        let cc = torus.wrap_col(c as isize + dc);
                        n += src[torus.index(rr, cc)];
                    }
                }
                out[torus.index(r, c)] = next_state(src[torus.index(r, c)], n);
            }
        }
        out
    }

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| u8::from((i * 31 + i / 7) % 5 < 2)).collect()
    }

    fn run_kernels(layout: &KernelLayout, src: &[u8]) -> Vec<u8> {
        // Sentinel catches any cell no kernel writes.
        let mut dst = vec![9; src.len()];
        group_kernel(layout, src, &mut dst);
        updown_kernel(layout, src, &mut dst);
        for &col in layout.border_columns() {
            column_kernel(layout, col, src, &mut dst);
        }
        dst
    }

    #[test]
    fn rule_table() {
        assert_eq!(next_state(0, 3), 1);
        assert_eq!(next_state(0, 2), 0);
        assert_eq!(next_state(1, 2), 1);
        assert_eq!(next_state(1, 3), 1);
        assert_eq!(next_state(1, 1), 0);
        assert_eq!(next_state(1, 4), 0);
    }

    #[test]
    fn kernels_match_naive_step() {
        for (rows, cols) in [(5, 5), (6, 9), (12, 50), (9, 77), (20, 131)] {
            let torus = Torus::new(rows, cols).unwrap();
            let layout = KernelLayout::new(torus);
            let src = pattern(rows * cols);
            assert_eq!(
                run_kernels(&layout, &src),
                naive_next(torus, &src),
                "{rows}x{cols}"
            );
        }
    }
}
