//! Grid configuration.
//!
//! Games configure the engine at startup with a `GridConfig`:
//! - grid size (N for an N×N grid)
//! - motion resolution (`tile_extent` position units per cell, advanced
//!   `move_velocity` units per step)
//! - winning value, starting tiles and spawn value weights
//!
//! The classic setting matches an 800×800 window split into 4×4 cells of
//! 200 units, sliding 20 units per frame. `GridConfig::instant()` uses one
//! unit per cell so every step moves a tile a whole cell; both settle to the
//! same boards.

use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::tile::is_valid_value;

/// Relative weight of a spawned tile value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnWeight {
    pub value: u32,
    pub weight: f32,
}

impl SpawnWeight {
    #[must_use]
    pub const fn new(value: u32, weight: f32) -> Self {
        Self { value, weight }
    }
}

/// Complete grid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Grid side length (the grid is `size`×`size`).
    pub size: usize,

    /// Position units spanned by one cell.
    pub tile_extent: i32,

    /// Position units a sliding tile advances per step.
    /// Must divide `tile_extent`.
    pub move_velocity: i32,

    /// Tile value that wins the game.
    pub winning_value: u32,

    /// Tiles placed on an empty board at game start.
    pub starting_tiles: usize,

    /// Value of each starting tile.
    pub starting_value: u32,

    /// Value distribution of spawned tiles. Weights need not sum to 1.
    pub spawn_weights: Vec<SpawnWeight>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 4,
            tile_extent: 200,
            move_velocity: 20,
            winning_value: 2048,
            starting_tiles: 2,
            starting_value: 2,
            spawn_weights: vec![SpawnWeight::new(2, 1.0), SpawnWeight::new(4, 1.0)],
        }
    }
}

impl GridConfig {
    /// Classic configuration on a `size`×`size` grid.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Classic configuration with one position unit per cell.
    #[must_use]
    pub fn instant() -> Self {
        Self::default().with_resolution(1, 1)
    }

    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Set cell extent and per-step velocity, in position units.
    #[must_use]
    pub fn with_resolution(mut self, tile_extent: i32, move_velocity: i32) -> Self {
        self.tile_extent = tile_extent;
        self.move_velocity = move_velocity;
        self
    }

    #[must_use]
    pub fn with_winning_value(mut self, value: u32) -> Self {
        self.winning_value = value;
        self
    }

    #[must_use]
    pub fn with_starting_tiles(mut self, count: usize, value: u32) -> Self {
        self.starting_tiles = count;
        self.starting_value = value;
        self
    }

    #[must_use]
    pub fn with_spawn_weights(mut self, weights: Vec<SpawnWeight>) -> Self {
        self.spawn_weights = weights;
        self
    }

    /// Number of cells on the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Steps a tile needs to cross one cell.
    #[must_use]
    pub fn steps_per_cell(&self) -> i32 {
        self.tile_extent / self.move_velocity
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.size == 0 {
            return Err(GameError::InvalidConfig("grid size must be at least 1".into()));
        }
        if self.move_velocity <= 0 || self.tile_extent <= 0 {
            return Err(GameError::InvalidConfig(format!(
                "tile extent {} and move velocity {} must be positive",
                self.tile_extent, self.move_velocity
            )));
        }
        if self.tile_extent % self.move_velocity != 0 {
            return Err(GameError::InvalidConfig(format!(
                "tile extent {} is not a multiple of move velocity {}",
                self.tile_extent, self.move_velocity
            )));
        }
        if !is_valid_value(self.winning_value) {
            return Err(GameError::InvalidConfig(format!(
                "winning value {} is not a power of two >= 2",
                self.winning_value
            )));
        }
        if !is_valid_value(self.starting_value) {
            return Err(GameError::InvalidConfig(format!(
                "starting value {} is not a power of two >= 2",
                self.starting_value
            )));
        }
        if self.starting_tiles > self.cell_count() {
            return Err(GameError::InvalidConfig(format!(
                "{} starting tiles do not fit on {} cells",
                self.starting_tiles,
                self.cell_count()
            )));
        }
        if self.spawn_weights.is_empty() {
            return Err(GameError::InvalidConfig("spawn weights are empty".into()));
        }
        for w in &self.spawn_weights {
            if !is_valid_value(w.value) {
                return Err(GameError::InvalidConfig(format!(
                    "spawn value {} is not a power of two >= 2",
                    w.value
                )));
            }
            if !w.weight.is_finite() || w.weight < 0.0 {
                return Err(GameError::InvalidConfig(format!(
                    "spawn weight {} for value {} must be finite and non-negative",
                    w.weight, w.value
                )));
            }
        }
        if self.spawn_weights.iter().map(|w| w.weight).sum::<f32>() <= 0.0 {
            return Err(GameError::InvalidConfig("spawn weights sum to zero".into()));
        }
        Ok(())
    }
}
