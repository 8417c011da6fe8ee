//! Grid cell coordinates.
//!
//! Cells are addressed as `(row, col)` with `(0, 0)` in the top-left corner.
//! Rows grow downwards and columns grow to the right, so "up" moves towards
//! row 0 and "left" moves towards column 0.
//!
//! ```
//! use rust_2048::core::Cell;
//!
//! let cell = Cell::new(1, 3);
//! assert!(cell.in_bounds(4));
//! assert!(!cell.in_bounds(3));
//! assert_eq!(Cell::from_index(7, 4), cell);
//! assert_eq!(cell.index(4), 7);
//! ```

use serde::{Deserialize, Serialize};

/// A discrete grid position.
///
/// Ordering is row-major, which is also the order in which boards iterate
/// their tiles and the spawner enumerates empty cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Cell for a row-major index on a `size`×`size` grid.
    #[must_use]
    pub const fn from_index(index: usize, size: usize) -> Self {
        Self {
            row: index / size,
            col: index % size,
        }
    }

    /// Row-major index on a `size`×`size` grid.
    #[must_use]
    pub const fn index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// Check that the cell lies on a `size`×`size` grid.
    #[must_use]
    pub const fn in_bounds(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Iterate over every cell of a `size`×`size` grid in row-major order.
    pub fn all(size: usize) -> impl Iterator<Item = Cell> {
        (0..size * size).map(move |i| Cell::from_index(i, size))
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
