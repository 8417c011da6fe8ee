//! Game rules: direction policies, the transition engine, spawning and
//! terminal-state evaluation.
//!
//! The transition engine never interprets game flow; it only turns a board
//! and a direction into a settled board. Spawning and terminal checks are
//! separate pure functions that the game session composes.

pub mod direction;
pub mod engine;
pub mod observer;
pub mod slide;
pub mod spawner;
pub mod terminal;

pub use direction::{Axis, Direction, DirectionPolicy};
pub use engine::{apply_move, MergeEvent, MergeLock, MoveOutcome, TransitionEngine};
pub use observer::{Frame, FrameRecorder, MoveObserver, NoopObserver, OnMerge};
pub use slide::{Rounding, SlidingTile};
pub use spawner::{place_random, spawn_tile, spawn_value};
pub use terminal::{has_moves_available, has_won, is_board_full, outcome, Outcome};
