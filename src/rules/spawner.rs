//! Tile spawning.
//!
//! After a move that changed the board, one tile appears at an empty cell
//! chosen uniformly at random. Its value is drawn from the configured
//! weights (2 and 4 with equal weight by default).

use log::trace;

use crate::core::{Board, GameError, GameRng, SpawnWeight, Tile};

/// Place a tile of `value` at a uniformly random empty cell.
pub fn place_random(board: &mut Board, rng: &mut GameRng, value: u32) -> Result<Tile, GameError> {
    let empty = board.empty_cells();
    let cell = *rng.choose(&empty).ok_or(GameError::SpawnOnFullBoard)?;
    board.place(cell, value)
}

/// Draw a spawn value from `weights`.
pub fn spawn_value(rng: &mut GameRng, weights: &[SpawnWeight]) -> Result<u32, GameError> {
    let raw: Vec<f32> = weights.iter().map(|w| w.weight).collect();
    rng.choose_weighted(&raw)
        .map(|i| weights[i].value)
        .ok_or_else(|| GameError::InvalidConfig("spawn weights are empty or all zero".into()))
}

/// Spawn one weighted-random tile at a uniformly random empty cell.
///
/// Fails with `SpawnOnFullBoard` when no cell is empty; the board is left
/// untouched in that case.
pub fn spawn_tile(board: &mut Board, rng: &mut GameRng, weights: &[SpawnWeight]) -> Result<Tile, GameError> {
    if board.len() >= board.capacity() {
        return Err(GameError::SpawnOnFullBoard);
    }
    let value = spawn_value(rng, weights)?;
    let tile = place_random(board, rng, value)?;
    trace!("spawned {} at {}", tile.value, tile.cell());
    Ok(tile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, GridConfig};

    fn weights() -> Vec<SpawnWeight> {
        GridConfig::default().spawn_weights
    }

    #[test]
    fn test_spawn_adds_exactly_one_tile() {
        let mut board = Board::new(4);
        let mut rng = GameRng::new(42);

        for expected in 1..=16 {
            let tile = spawn_tile(&mut board, &mut rng, &weights()).unwrap();
            assert_eq!(board.len(), expected);
            assert!(tile.value == 2 || tile.value == 4);
            assert_eq!(board.get(tile.cell()), Some(&tile));
        }
    }

    #[test]
    fn test_spawn_on_full_board() {
        let mut board = Board::from_rows(&[[2, 4], [8, 16]]).unwrap();
        let before = board.clone();
        let mut rng = GameRng::new(1);

        assert_eq!(
            spawn_tile(&mut board, &mut rng, &weights()),
            Err(GameError::SpawnOnFullBoard)
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_spawn_fills_only_empty_cell() {
        let mut board = Board::from_rows(&[[2, 4], [0, 16]]).unwrap();
        let mut rng = GameRng::new(9);

        let tile = spawn_tile(&mut board, &mut rng, &weights()).unwrap();
        assert_eq!(tile.cell(), Cell::new(1, 0));
        assert_eq!(board.get(Cell::new(0, 0)).map(|t| t.value), Some(2));
    }

    #[test]
    fn test_spawn_value_distribution() {
        let mut rng = GameRng::new(3);
        let w = weights();
        let fours = (0..10_000)
            .filter(|_| spawn_value(&mut rng, &w).unwrap() == 4)
            .count();
        assert!((4_500..=5_500).contains(&fours));
    }

    #[test]
    fn test_spawn_value_respects_weights() {
        let mut rng = GameRng::new(3);
        let only_four = vec![SpawnWeight::new(2, 0.0), SpawnWeight::new(4, 1.0)];
        for _ in 0..50 {
            assert_eq!(spawn_value(&mut rng, &only_four), Ok(4));
        }
        assert!(spawn_value(&mut rng, &[]).is_err());
    }

    #[test]
    fn test_spawn_is_deterministic() {
        let mut a = Board::new(4);
        let mut b = Board::new(4);
        let mut rng_a = GameRng::new(77);
        let mut rng_b = GameRng::new(77);

        for _ in 0..5 {
            spawn_tile(&mut a, &mut rng_a, &weights()).unwrap();
            spawn_tile(&mut b, &mut rng_b, &weights()).unwrap();
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_spawn_cell_is_uniform_over_empty_cells() {
        let board = Board::from_rows(&[[2, 0, 4], [0, 0, 0], [8, 0, 16]]).unwrap();
        let empty = board.empty_cells();
        assert_eq!(empty.len(), 5);

        let mut rng = GameRng::new(2024);
        let mut counts = std::collections::HashMap::new();
        for _ in 0..10_000 {
            let mut trial = board.clone();
            let tile = spawn_tile(&mut trial, &mut rng, &weights()).unwrap();
            assert!(board.get(tile.cell()).is_none(), "spawned over {}", tile.cell());
            *counts.entry(tile.cell()).or_insert(0usize) += 1;
        }

        assert_eq!(counts.len(), empty.len());
        for cell in &empty {
            let n = counts.get(cell).copied().unwrap_or(0);
            assert!((1_800..=2_200).contains(&n), "{cell} drawn {n} times");
        }
    }
}

