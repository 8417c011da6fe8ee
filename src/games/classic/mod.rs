//! Classic single-player sliding-tile game.
//!
//! - The board starts with two tiles of value 2
//! - Each move slides every tile, merges equal neighbors once, then spawns
//!   a 2 or a 4 on a random empty cell (only if the move changed anything)
//! - Reaching the winning value wins; filling the board loses
//!
//! Grid size, winning value, motion resolution and spawn weights are all
//! configurable through `GameBuilder`.

mod game;

pub use game::{Game, GameBuilder, GameSnapshot, MoveReport};
