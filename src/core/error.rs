//! Error taxonomy for the engine and the game session.
//!
//! Every variant is a caller error: the transition engine itself is total
//! over valid boards and never fails.

use super::cell::Cell;
use crate::rules::Outcome;

/// Errors surfaced by board construction, spawning, parsing and play.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Direction text outside `left`, `right`, `up`, `down`.
    #[error("invalid direction: {0:?}")]
    InvalidDirection(String),

    /// Spawn requested on a board with no empty cell.
    #[error("cannot spawn a tile on a full board")]
    SpawnOnFullBoard,

    /// Move requested after the game reached a terminal outcome.
    #[error("game already finished: {0:?}")]
    GameFinished(Outcome),

    /// Configuration rejected by `GridConfig::validate`.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Cell outside an `size`×`size` grid.
    #[error("{cell} is outside a {size}x{size} grid")]
    CellOutOfBounds { cell: Cell, size: usize },

    /// Cell already holds a tile.
    #[error("{0} is already occupied")]
    CellOccupied(Cell),

    /// Tile value that is not a power of two >= 2.
    #[error("invalid tile value {0}: must be a power of two >= 2")]
    InvalidTileValue(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            GameError::InvalidDirection("north".into()).to_string(),
            "invalid direction: \"north\""
        );
        assert_eq!(
            GameError::CellOutOfBounds { cell: Cell::new(4, 0), size: 4 }.to_string(),
            "(4, 0) is outside a 4x4 grid"
        );
        assert_eq!(
            GameError::InvalidTileValue(3).to_string(),
            "invalid tile value 3: must be a power of two >= 2"
        );
    }
}
