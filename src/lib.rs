//! # rust-2048
//!
//! A deterministic grid transition engine for sliding-tile (2048-style)
//! puzzles.
//!
//! ## Design Principles
//!
//! 1. **One algorithm, four directions**: every direction-specific rule
//!    lives in a `DirectionPolicy`; the transition engine has a single body.
//!
//! 2. **No I/O in the core**: merges and steps are reported through a
//!    `MoveObserver`. Rendering, audio and frame pacing plug in from outside.
//!
//! 3. **Deterministic**: spawning draws from a seeded, serializable
//!    `GameRng`, and boards iterate in a fixed order.
//!
//! ## Architecture
//!
//! - **Stepwise resolution**: a move is a sequence of small steps that
//!   converge on a settled board. The step size is configurable, from whole
//!   cells (instant) to animation frames; all resolutions settle alike.
//!
//! - **Persistent boards**: O(1) cloning via `im-rs` for what-if checks.
//!
//! ## Modules
//!
//! - `core`: Cells, tiles, board, RNG, configuration, errors
//! - `rules`: Directions, transition engine, spawner, terminal evaluation
//! - `games`: Game sessions (the classic game)

pub mod core;
pub mod rules;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    Board, Cell, Tile, TileId,
    GameRng, GameRngState,
    GridConfig, SpawnWeight,
    GameError,
};

pub use crate::rules::{
    Direction, DirectionPolicy,
    TransitionEngine, MoveOutcome, MergeEvent, MergeLock, apply_move,
    MoveObserver, NoopObserver, FrameRecorder, OnMerge,
    spawn_tile, is_board_full, has_won, has_moves_available, outcome, Outcome,
};

pub use crate::games::classic::{Game, GameBuilder, GameSnapshot, MoveReport};
