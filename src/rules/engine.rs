//! Transition engine: resolves one swipe into a settled board.
//!
//! A move is resolved as a sequence of steps. In each step every tile, in
//! the policy's scan order, either advances by one step delta, merges into
//! the same-valued tile ahead of it, or stays blocked. Steps repeat until
//! one changes nothing; the board has then settled.
//!
//! ## Merge rules
//!
//! - A tile merges into its neighbor only when they are within one step of
//!   each other; further apart it keeps sliding.
//! - The **neighbor** survives with the doubled value and keeps its ID; the
//!   moving tile is removed for the rest of the move.
//! - Both tiles must be outside the `MergeLock`. The survivor joins it, so
//!   no tile takes part in two merges during one move.
//! - Two tiles of `1 << 31` never merge; the pair behaves like differing
//!   values.
//! - Tiles closest to the edge are processed first and later tiles see
//!   their updated positions, so a tile can never overtake one ahead of it.
//!
//! ## Resolution
//!
//! `tile_extent / move_velocity` steps carry a tile across one cell.
//! `TransitionEngine::instant()` moves whole cells per step; the classic
//! 200/20 resolution yields ten frames per cell. Both settle identically.
//!
//! ```
//! use rust_2048::core::Board;
//! use rust_2048::rules::{Direction, TransitionEngine};
//!
//! let board = Board::from_rows(&[
//!     [2, 2, 0, 0],
//!     [0, 0, 0, 0],
//!     [0, 0, 0, 0],
//!     [0, 0, 0, 0],
//! ]).unwrap();
//!
//! let outcome = TransitionEngine::instant().apply_move(&board, Direction::Left);
//! assert!(outcome.changed);
//! assert_eq!(outcome.board.to_rows()[0], vec![4, 0, 0, 0]);
//! assert_eq!(outcome.merges.len(), 1);
//! ```

use log::{debug, trace};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::direction::Direction;
use super::observer::{MoveObserver, NoopObserver};
use super::slide::SlidingTile;
use crate::core::{Board, Cell, GameError, GridConfig, TileId};

/// A single merge during a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeEvent {
    /// Step (1-based) in which the merge happened.
    pub step: u32,
    /// Tile that kept its place and doubled.
    pub survivor: TileId,
    /// Tile that slid into the survivor and disappeared.
    pub absorbed: TileId,
    /// Survivor's cell at the moment of the merge.
    pub cell: Cell,
    /// Value after doubling.
    pub value: u32,
}

/// Tiles that already merged during the current move.
#[derive(Clone, Debug, Default)]
pub struct MergeLock {
    locked: FxHashSet<TileId>,
}

impl MergeLock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&mut self, id: TileId) {
        self.locked.insert(id);
    }

    #[must_use]
    pub fn is_locked(&self, id: TileId) -> bool {
        self.locked.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locked.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locked.is_empty()
    }
}

/// Result of resolving one move.
#[derive(Clone, Debug)]
pub struct MoveOutcome {
    /// Settled board; replaces the board the move started from.
    pub board: Board,
    /// False when no tile could slide or merge (a no-op move).
    pub changed: bool,
    /// Steps that changed the board.
    pub steps: u32,
    /// Merges in the order they happened.
    /// SmallVec covers the common case without heap allocation.
    pub merges: SmallVec<[MergeEvent; 8]>,
}

impl MoveOutcome {
    /// Sum of the values created by merges in this move.
    #[must_use]
    pub fn merged_value(&self) -> u64 {
        self.merges.iter().map(|m| u64::from(m.value)).sum()
    }
}

/// What a tile does in one step.
enum StepAction {
    Advance,
    Merge(usize),
    Blocked,
}

/// Resolves moves at a fixed motion resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionEngine {
    tile_extent: i32,
    move_velocity: i32,
}

impl Default for TransitionEngine {
    fn default() -> Self {
        Self::instant()
    }
}

impl TransitionEngine {
    /// One step per cell.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            tile_extent: 1,
            move_velocity: 1,
        }
    }

    /// Engine at the resolution of a validated configuration.
    pub fn from_config(config: &GridConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            tile_extent: config.tile_extent,
            move_velocity: config.move_velocity,
        })
    }

    #[must_use]
    pub fn tile_extent(&self) -> i32 {
        self.tile_extent
    }

    #[must_use]
    pub fn move_velocity(&self) -> i32 {
        self.move_velocity
    }

    /// Resolve a move without observation.
    #[must_use]
    pub fn apply_move(&self, board: &Board, direction: Direction) -> MoveOutcome {
        self.apply_move_observed(board, direction, &mut NoopObserver)
    }

    /// Check if moving in `direction` would change the board.
    #[must_use]
    pub fn can_move(&self, board: &Board, direction: Direction) -> bool {
        Self::instant().apply_move(board, direction).changed
    }

    /// Resolve a move, reporting merges and steps to `observer`.
    pub fn apply_move_observed<O: MoveObserver + ?Sized>(
        &self,
        board: &Board,
        direction: Direction,
        observer: &mut O,
    ) -> MoveOutcome {
        let policy = direction.policy();
        let size = board.size();
        let extent = self.tile_extent;
        let velocity = self.move_velocity;
        let delta = policy.step_delta(velocity);

        let mut tiles: Vec<SlidingTile> = board
            .tiles()
            .map(|tile| SlidingTile::new(*tile, extent))
            .collect();
        let mut locks = MergeLock::new();
        let mut merges: SmallVec<[MergeEvent; 8]> = SmallVec::new();
        let mut steps = 0u32;

        loop {
            tiles.sort_by(|a, b| policy.scan_order(a, b));
            let mut updated = false;
            let mut i = 0;

            while i < tiles.len() {
                if policy.is_at_boundary(&tiles[i], size) {
                    i += 1;
                    continue;
                }

                let action = match policy.neighbor(i, &tiles) {
                    None => StepAction::Advance,
                    Some(j) => {
                        let (tile, next) = (&tiles[i], &tiles[j]);
                        // A pair whose sum does not fit in u32 stays apart
                        let mergeable = tile.tile.value == next.tile.value
                            && next.tile.value.checked_mul(2).is_some()
                            && !locks.is_locked(tile.tile.id)
                            && !locks.is_locked(next.tile.id);
                        if mergeable {
                            if policy.still_separated(tile, next, velocity) {
                                StepAction::Advance
                            } else {
                                StepAction::Merge(j)
                            }
                        } else if policy.has_clearance(tile, next, extent, velocity) {
                            StepAction::Advance
                        } else {
                            StepAction::Blocked
                        }
                    }
                };

                match action {
                    StepAction::Advance => {
                        tiles[i].advance(delta);
                        updated = true;
                        i += 1;
                    }
                    StepAction::Merge(j) => {
                        let absorbed = tiles.remove(i);
                        let j = if j > i { j - 1 } else { j };
                        let survivor = &mut tiles[j];
                        survivor.tile.value *= 2;
                        locks.lock(survivor.tile.id);

                        let event = MergeEvent {
                            step: steps + 1,
                            survivor: survivor.tile.id,
                            absorbed: absorbed.tile.id,
                            cell: survivor.tile.cell(),
                            value: survivor.tile.value,
                        };
                        trace!(
                            "{} merged into {} at {} -> {}",
                            event.absorbed,
                            event.survivor,
                            event.cell,
                            event.value
                        );
                        observer.on_merge(&event);
                        merges.push(event);
                        updated = true;
                        // tiles[i] is now the next tile in scan order
                    }
                    StepAction::Blocked => i += 1,
                }
            }

            for tile in &mut tiles {
                tile.snap(policy.rounding, extent);
            }

            if !updated {
                break;
            }
            steps += 1;
            observer.on_step(steps, &tiles);
        }

        debug_assert!(tiles.iter().all(|t| t.is_aligned(extent)), "unaligned tile after settling");
        debug_assert_eq!(locks.len(), merges.len(), "a tile merged twice");
        debug!(
            "{} settled in {} steps: {} tiles, {} merges",
            direction,
            steps,
            tiles.len(),
            merges.len()
        );

        MoveOutcome {
            board: Board::from_settled(size, board.next_id(), tiles.into_iter().map(|t| t.tile)),
            changed: steps > 0,
            steps,
            merges,
        }
    }
}

/// Resolve a move with the instantaneous engine.
#[must_use]
pub fn apply_move(board: &Board, direction: Direction) -> MoveOutcome {
    TransitionEngine::instant().apply_move(board, direction)
}
