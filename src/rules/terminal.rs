//! Terminal-state evaluation.
//!
//! Everything here is recomputed from the board on every call; nothing is
//! cached.
//!
//! Note that a full board counts as lost even when adjacent equal tiles
//! could still merge. `has_moves_available` answers the stricter question
//! but does not feed into `outcome`.

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::engine::TransitionEngine;
use crate::core::Board;

/// State of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    /// A tile reached the winning value.
    Won,
    /// The board is full.
    Lost,
}

impl Outcome {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

/// Check if every cell holds a tile.
#[must_use]
pub fn is_board_full(board: &Board) -> bool {
    board.len() == board.capacity()
}

/// Check if some tile equals `target`.
#[must_use]
pub fn has_won(board: &Board, target: u32) -> bool {
    board.contains_value(target)
}

/// Combine both predicates. Victory takes precedence over a full board.
#[must_use]
pub fn outcome(board: &Board, target: u32) -> Outcome {
    if has_won(board, target) {
        Outcome::Won
    } else if is_board_full(board) {
        Outcome::Lost
    } else {
        Outcome::InProgress
    }
}

/// Check if any direction would change the board.
#[must_use]
pub fn has_moves_available(board: &Board) -> bool {
    let engine = TransitionEngine::instant();
    Direction::ALL.iter().any(|&dir| engine.can_move(board, dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_board_with_merges_is_lost() {
        let board = Board::from_rows(&[
            [2, 2, 4, 8],
            [16, 32, 64, 128],
            [2, 4, 8, 16],
            [32, 64, 128, 256],
        ])
        .unwrap();

        assert!(is_board_full(&board));
        assert!(has_moves_available(&board));
        assert_eq!(outcome(&board, 2048), Outcome::Lost);
    }

    #[test]
    fn test_stuck_board() {
        let board = Board::from_rows(&[[2, 4], [4, 2]]).unwrap();
        assert!(is_board_full(&board));
        assert!(!has_moves_available(&board));
    }

    #[test]
    fn test_has_won() {
        let board = Board::from_rows(&[[2048, 0], [0, 2]]).unwrap();
        assert!(has_won(&board, 2048));
        assert!(!has_won(&board, 4096));
        assert!(!has_won(&Board::new(4), 2048));
    }

    #[test]
    fn test_victory_takes_precedence() {
        let board = Board::from_rows(&[[2048, 4], [8, 16]]).unwrap();
        assert_eq!(outcome(&board, 2048), Outcome::Won);
    }

    #[test]
    fn test_in_progress() {
        let board = Board::from_rows(&[[2, 0], [0, 0]]).unwrap();
        assert_eq!(outcome(&board, 2048), Outcome::InProgress);
        assert!(!Outcome::InProgress.is_terminal());
        assert!(Outcome::Won.is_terminal());
        assert!(Outcome::Lost.is_terminal());
    }
}
