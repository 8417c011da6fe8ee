//! The authoritative grid state.
//!
//! A `Board` is a sparse mapping from `Cell` to `Tile` on a `size`×`size`
//! grid. Keys are unique, so two tiles can never share a cell once settled.
//!
//! ## Cloning
//!
//! Tiles live in an `im::OrdMap`: cloning a board is O(1), which keeps
//! what-if evaluation (e.g. "would this direction change anything?") cheap,
//! and iteration is always row-major and deterministic.
//!
//! ```
//! use rust_2048::core::{Board, Cell};
//!
//! let board = Board::from_rows(&[
//!     [2, 0, 0, 0],
//!     [0, 4, 0, 0],
//!     [0, 0, 0, 0],
//!     [0, 0, 0, 8],
//! ]).unwrap();
//!
//! assert_eq!(board.len(), 3);
//! assert_eq!(board.get(Cell::new(1, 1)).map(|t| t.value), Some(4));
//! assert_eq!(board.max_value(), Some(8));
//! ```

use im::OrdMap;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::error::GameError;
use super::tile::{is_valid_value, Tile, TileId};

/// Grid state: at most one tile per cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BoardRepr", try_from = "BoardRepr")]
pub struct Board {
    size: usize,
    tiles: OrdMap<Cell, Tile>,
    /// Next tile ID to allocate.
    next_id: u32,
}

impl Board {
    /// Create an empty `size`×`size` board.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            tiles: OrdMap::new(),
            next_id: 0,
        }
    }

    /// Build a board from rows of values, `0` meaning an empty cell.
    ///
    /// The number of rows sets the grid size; every row must have that
    /// many entries.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, GameError> {
        let size = rows.len();
        let mut board = Self::new(size);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != size {
                return Err(GameError::InvalidConfig(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    values.len(),
                    size
                )));
            }
            for (col, &value) in values.iter().enumerate() {
                if value != 0 {
                    board.place(Cell::new(row, col), value)?;
                }
            }
        }
        Ok(board)
    }

    /// Values as rows, `0` for empty cells.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        let mut rows = vec![vec![0; self.size]; self.size];
        for tile in self.tiles.values() {
            rows[tile.row][tile.col] = tile.value;
        }
        rows
    }

    /// Grid side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells on the grid.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.size * self.size
    }

    /// Number of tiles on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<&Tile> {
        self.tiles.get(&cell)
    }

    /// Iterate over tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Empty cells in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<Cell> {
        Cell::all(self.size)
            .filter(|cell| !self.tiles.contains_key(cell))
            .collect()
    }

    /// Highest tile value, or `None` on an empty board.
    #[must_use]
    pub fn max_value(&self) -> Option<u32> {
        self.tiles.values().map(|t| t.value).max()
    }

    /// Sum of all tile values.
    #[must_use]
    pub fn sum(&self) -> u64 {
        self.tiles.values().map(|t| u64::from(t.value)).sum()
    }

    /// Check if any tile holds `value`.
    #[must_use]
    pub fn contains_value(&self, value: u32) -> bool {
        self.tiles.values().any(|t| t.value == value)
    }

    /// Place a new tile with a freshly allocated ID.
    pub fn place(&mut self, cell: Cell, value: u32) -> Result<Tile, GameError> {
        if !cell.in_bounds(self.size) {
            return Err(GameError::CellOutOfBounds { cell, size: self.size });
        }
        if !is_valid_value(value) {
            return Err(GameError::InvalidTileValue(value));
        }
        if self.tiles.contains_key(&cell) {
            return Err(GameError::CellOccupied(cell));
        }
        let tile = Tile::new(self.alloc_id(), value, cell);
        self.tiles.insert(cell, tile);
        Ok(tile)
    }

    /// Allocate a new tile ID.
    fn alloc_id(&mut self) -> TileId {
        let id = TileId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Rebuild a board from settled tiles, keeping the ID allocator.
    ///
    /// Callers guarantee tiles are in bounds and occupy distinct cells.
    pub(crate) fn from_settled(
        size: usize,
        next_id: u32,
        tiles: impl IntoIterator<Item = Tile>,
    ) -> Self {
        let mut map = OrdMap::new();
        for tile in tiles {
            let previous = map.insert(tile.cell(), tile);
            debug_assert!(previous.is_none(), "two tiles settled on {}", tile.cell());
        }
        Self {
            size,
            tiles: map,
            next_id,
        }
    }

    pub(crate) fn next_id(&self) -> u32 {
        self.next_id
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self
            .max_value()
            .map_or(1, |v| v.to_string().len())
            .max(1);
        for row in 0..self.size {
            for col in 0..self.size {
                if col > 0 {
                    write!(f, " ")?;
                }
                match self.tiles.get(&Cell::new(row, col)) {
                    Some(tile) => write!(f, "{:>width$}", tile.value, width = width)?,
                    None => write!(f, "{:>width$}", ".", width = width)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Serialized form: a flat tile list (cells are not valid JSON map keys).
#[derive(Clone, Debug, Serialize, Deserialize)]
struct BoardRepr {
    size: usize,
    next_id: u32,
    tiles: Vec<Tile>,
}

impl From<Board> for BoardRepr {
    fn from(board: Board) -> Self {
        Self {
            size: board.size,
            next_id: board.next_id,
            tiles: board.tiles.values().copied().collect(),
        }
    }
}

impl TryFrom<BoardRepr> for Board {
    type Error = GameError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        let mut tiles = OrdMap::new();
        let mut ids = FxHashSet::default();
        for tile in repr.tiles {
            if !ids.insert(tile.id) {
                return Err(GameError::InvalidConfig(format!("{} appears twice", tile.id)));
            }
            if tile.id.raw() >= repr.next_id {
                return Err(GameError::InvalidConfig(format!(
                    "{} is not below the next id {}",
                    tile.id, repr.next_id
                )));
            }
            let cell = tile.cell();
            if !cell.in_bounds(repr.size) {
                return Err(GameError::CellOutOfBounds { cell, size: repr.size });
            }
            if !is_valid_value(tile.value) {
                return Err(GameError::InvalidTileValue(tile.value));
            }
            if tiles.insert(cell, tile).is_some() {
                return Err(GameError::CellOccupied(cell));
            }
        }
        Ok(Self {
            size: repr.size,
            tiles,
            next_id: repr.next_id,
        })
    }
}
