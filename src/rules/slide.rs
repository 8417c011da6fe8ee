//! Tiles in motion.
//!
//! While a move is being resolved each tile carries a continuous position
//! in position units (`tile_extent` units per cell). The discrete cell is
//! recomputed from that position after every step, rounding towards the
//! cell the tile is leaving so the cell only changes once the tile has fully
//! crossed into the next one.

use serde::{Deserialize, Serialize};

use crate::core::Tile;

/// Rounding used when mapping a continuous position back to a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rounding {
    /// Round up (tiles travelling towards row/col 0).
    Ceil,
    /// Round down (tiles travelling away from row/col 0).
    Floor,
}

impl Rounding {
    /// Cell index for a non-negative position.
    #[must_use]
    pub fn cell_index(self, position: i32, tile_extent: i32) -> usize {
        let index = match self {
            Rounding::Ceil => -((-position).div_euclid(tile_extent)),
            Rounding::Floor => position.div_euclid(tile_extent),
        };
        index.max(0) as usize
    }
}

/// A tile together with its continuous position during a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlidingTile {
    pub tile: Tile,
    pub x: i32,
    pub y: i32,
}

impl SlidingTile {
    /// Place a settled tile at the top-left corner of its cell.
    #[must_use]
    pub fn new(tile: Tile, tile_extent: i32) -> Self {
        Self {
            tile,
            x: tile.col as i32 * tile_extent,
            y: tile.row as i32 * tile_extent,
        }
    }

    /// Move by `(dx, dy)` position units.
    pub fn advance(&mut self, (dx, dy): (i32, i32)) {
        self.x += dx;
        self.y += dy;
    }

    /// Recompute the discrete cell from the continuous position.
    pub fn snap(&mut self, rounding: Rounding, tile_extent: i32) {
        self.tile.row = rounding.cell_index(self.y, tile_extent);
        self.tile.col = rounding.cell_index(self.x, tile_extent);
    }

    /// Check that the tile sits exactly on its cell.
    #[must_use]
    pub fn is_aligned(&self, tile_extent: i32) -> bool {
        self.x == self.tile.col as i32 * tile_extent && self.y == self.tile.row as i32 * tile_extent
    }
}
