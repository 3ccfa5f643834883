//! Wrap-around (torus) neighbourhood arithmetic.
//!
//! Every cell has exactly eight neighbours: the four cardinal directions
//! plus the four diagonals, with rows and columns wrapping to the opposite
//! edge. On very small tori some of those eight positions coincide (on a
//! one-row grid the cell above and below is the cell itself); they are still
//! reported once per offset.

use smallvec::SmallVec;

use crate::error::GridError;

/// All 8 offsets: N, S, W, E, NW, NE, SW, SE.
pub const OFFSETS_8: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Dimensions of a toroidal grid plus the wrap helpers that go with them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Torus {
    rows: usize,
    cols: usize,
}

impl Torus {
    /// Create a torus of `rows * cols` cells.
    ///
    /// Returns `Err(GridError::EmptyGrid)` if either dimension is 0, or
    /// `Err(GridError::CellCountOverflow)` if the product exceeds the
    /// largest allocatable buffer (`isize::MAX` bytes).
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid { rows, cols });
        }
        match rows.checked_mul(cols) {
            Some(n) if n <= isize::MAX as usize => {}
            _ => return Err(GridError::CellCountOverflow { rows, cols }),
        }
        Ok(Self { rows, cols })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Row-major index of `(row, col)`.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Row above `row`, wrapping from the first row to the last.
    #[inline]
    pub fn above(&self, row: usize) -> usize {
        if row == 0 {
            self.rows - 1
        } else {
            row - 1
        }
    }

    /// Row below `row`, wrapping from the last row to the first.
    #[inline]
    pub fn below(&self, row: usize) -> usize {
        if row + 1 == self.rows {
            0
        } else {
            row + 1
        }
    }

    /// Column left of `col`, wrapping.
    #[inline]
    pub fn left(&self, col: usize) -> usize {
        if col == 0 {
            self.cols - 1
        } else {
            col - 1
        }
    }

    /// Column right of `col`, wrapping.
    #[inline]
    pub fn right(&self, col: usize) -> usize {
        if col + 1 == self.cols {
            0
        } else {
            col + 1
        }
    }

    /// Wrap an arbitrary signed row onto the torus.
    pub fn wrap_row(&self, row: isize) -> usize {
        row.rem_euclid(self.rows as isize) as usize
    }

    /// Wrap an arbitrary signed column onto the torus.
    pub fn wrap_col(&self, col: isize) -> usize {
        col.rem_euclid(self.cols as isize) as usize
    }

    /// Row-major indices of the 8 neighbours of `(row, col)`.
    ///
    /// Order: NW, N, NE, W, E, SW, S, SE.
    #[inline]
    pub fn neighbour_indices(&self, row: usize, col: usize) -> [usize; 8] {
        let up = self.above(row) * self.cols;
        let mid = row * self.cols;
        let down = self.below(row) * self.cols;
        let l = self.left(col);
        let r = self.right(col);
        [
            up + l,
            up + col,
            up + r,
            mid + l,
            mid + r,
            down + l,
            down + col,
            down + r,
        ]
    }

    /// The 8 neighbours of `(row, col)` as `(row, col)` pairs, in
    /// [`OFFSETS_8`] order.
    pub fn neighbours(&self, row: usize, col: usize) -> SmallVec<[(usize, usize); 8]> {
        OFFSETS_8
            .iter()
            .map(|&(dr, dc)| {
                (
                    self.wrap_row(row as isize + dr),
                    self.wrap_col(col as isize + dc),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_empty() {
        assert_eq!(
            Torus::new(0, 4),
            Err(GridError::EmptyGrid { rows: 0, cols: 4 })
        );
        assert_eq!(
            Torus::new(4, 0),
            Err(GridError::EmptyGrid { rows: 4, cols: 0 })
        );
    }

    #[test]
    fn rejects_overflow() {
        assert!(matches!(
            Torus::new(usize::MAX, 2),
            Err(GridError::CellCountOverflow { .. })
        ));
        // Fits in usize but not in a Vec.
        let half = usize::MAX / 2 + 1;
        assert!(matches!(
            Torus::new(half, 1),
            Err(GridError::CellCountOverflow { .. })
        ));
        assert!(Torus::new(isize::MAX as usize, 1).is_ok());
    }

    #[test]
    fn corner_wraps_to_opposite_corner() {
        let t = Torus::new(5, 7).unwrap();
        let n = t.neighbours(0, 0);
        assert_eq!(n.len(), 8);
        assert!(n.contains(&(4, 6)));
        assert!(n.contains(&(4, 0)));
        assert!(n.contains(&(0, 6)));
        assert!(n.contains(&(1, 1)));
    }

    #[test]
    fn single_row_neighbours_include_self() {
        let t = Torus::new(1, 4).unwrap();
        let n = t.neighbours(0, 1);
        assert_eq!(n.iter().filter(|&&p| p == (0, 1)).count(), 2);
    }

    proptest! {
        #[test]
        fn indices_match_pairs(
            rows in 1usize..12,
            cols in 1usize..12,
            r in 0usize..12,
            c in 0usize..12,
        ) {
            let t = Torus::new(rows, cols).unwrap();
            let (r, c) = (r % rows, c % cols);
            let mut from_indices = t.neighbour_indices(r, c).to_vec();
            let mut from_pairs: Vec<usize> = t
                .neighbours(r, c)
                .iter()
                .map(|&(nr, nc)| t.index(nr, nc))
                .collect();
            from_indices.sort_unstable();
            from_pairs.sort_unstable();
            prop_assert_eq!(from_indices, from_pairs);
        }

        #[test]
        fn neighbourhood_is_symmetric(
            rows in 3usize..10,
            cols in 3usize..10,
            r in 0usize..10,
            c in 0usize..10,
        ) {
            let t = Torus::new(rows, cols).unwrap();
            let (r, c) = (r % rows, c % cols);
            for (nr, nc) in t.neighbours(r, c) {
                prop_assert!(t.neighbours(nr, nc).contains(&(r, c)));
            }
        }
    }
}
