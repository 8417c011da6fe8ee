//! Tiles and tile identity.
//!
//! A `Tile` is a settled, cell-aligned value on the board. Its `TileId` is
//! stable for the lifetime of a game: a tile keeps its id while it slides,
//! and a merge keeps the id of the surviving (neighbor) tile. MergeLock and
//! merge events refer to tiles by id.

use serde::{Deserialize, Serialize};

use super::cell::Cell;

/// Unique identifier for a tile within one board lineage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Check that `value` is a legal tile value (a power of two, at least 2).
#[must_use]
pub const fn is_valid_value(value: u32) -> bool {
    value >= 2 && value.is_power_of_two()
}

/// A settled tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,

    /// Power of two, at least 2.
    pub value: u32,

    pub row: usize,
    pub col: usize,
}

impl Tile {
    #[must_use]
    pub const fn new(id: TileId, value: u32, cell: Cell) -> Self {
        Self {
            id,
            value,
            row: cell.row,
            col: cell.col,
        }
    }

    #[must_use]
    pub const fn cell(&self) -> Cell {
        Cell::new(self.row, self.col)
    }

    /// Exponent of the value (2 → 1, 2048 → 11).
    #[must_use]
    pub const fn rank(&self) -> u32 {
        self.value.trailing_zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_values() {
        assert!(is_valid_value(2));
        assert!(is_valid_value(4));
        assert!(is_valid_value(2048));
        assert!(!is_valid_value(0));
        assert!(!is_valid_value(1));
        assert!(!is_valid_value(6));
    }

    #[test]
    fn test_tile_cell_and_rank() {
        let tile = Tile::new(TileId::new(7), 2048, Cell::new(1, 2));
        assert_eq!(tile.cell(), Cell::new(1, 2));
        assert_eq!(tile.rank(), 11);
        assert_eq!(format!("{}", tile.id), "Tile(7)");
    }
}
