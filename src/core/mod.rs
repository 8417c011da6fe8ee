//! Core engine types: cells, tiles, the board, RNG, configuration, errors.
//!
//! This module holds the state the rules operate on. It knows nothing about
//! directions or merging.

pub mod board;
pub mod cell;
pub mod config;
pub mod error;
pub mod rng;
pub mod tile;

pub use board::Board;
pub use cell::Cell;
pub use config::{GridConfig, SpawnWeight};
pub use error::GameError;
pub use rng::{GameRng, GameRngState};
pub use tile::{is_valid_value, Tile, TileId};
