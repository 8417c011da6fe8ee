//! Swipe directions and their policies.
//!
//! A `Direction` selects a `DirectionPolicy`: one struct of rules that lets
//! the transition engine run a single algorithm for all four directions.
//!
//! | direction | scan key | scan order | delta      | edge          | rounding |
//! |-----------|----------|------------|------------|---------------|----------|
//! | left      | column   | ascending  | (-v, 0)    | col == 0      | ceil     |
//! | right     | column   | descending | (+v, 0)    | col == N - 1  | floor    |
//! | up        | row      | ascending  | (0, -v)    | row == 0      | ceil     |
//! | down      | row      | descending | (0, +v)    | row == N - 1  | floor    |
//!
//! ```
//! use rust_2048::rules::Direction;
//!
//! let dir: Direction = "Left".parse().unwrap();
//! assert_eq!(dir, Direction::Left);
//! assert!("north".parse::<Direction>().is_err());
//! ```

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::slide::{Rounding, SlidingTile};
use crate::core::GameError;

/// Swipe direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    /// Policy for this direction.
    #[must_use]
    pub const fn policy(self) -> DirectionPolicy {
        match self {
            Direction::Left => DirectionPolicy {
                direction: self,
                axis: Axis::Horizontal,
                sign: -1,
                rounding: Rounding::Ceil,
            },
            Direction::Right => DirectionPolicy {
                direction: self,
                axis: Axis::Horizontal,
                sign: 1,
                rounding: Rounding::Floor,
            },
            Direction::Up => DirectionPolicy {
                direction: self,
                axis: Axis::Vertical,
                sign: -1,
                rounding: Rounding::Ceil,
            },
            Direction::Down => DirectionPolicy {
                direction: self,
                axis: Axis::Vertical,
                sign: 1,
                rounding: Rounding::Floor,
            },
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Direction {
    type Err = GameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(GameError::InvalidDirection(value.to_string())),
        }
    }
}

/// Axis of travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Along a row (left/right).
    Horizontal,
    /// Along a column (up/down).
    Vertical,
}

/// Direction-specific rules for the transition engine.
///
/// Stateless: every method is a pure function of its arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectionPolicy {
    pub direction: Direction,
    pub axis: Axis,
    /// `-1` when travelling towards row/col 0, `+1` otherwise.
    pub sign: i32,
    pub rounding: Rounding,
}

impl DirectionPolicy {
    /// Lane a tile travels in: its row for left/right, its column for up/down.
    #[must_use]
    pub fn lane(&self, tile: &SlidingTile) -> usize {
        match self.axis {
            Axis::Horizontal => tile.tile.row,
            Axis::Vertical => tile.tile.col,
        }
    }

    /// Discrete scan key: column for left/right, row for up/down.
    #[must_use]
    pub fn scan_key(&self, tile: &SlidingTile) -> usize {
        match self.axis {
            Axis::Horizontal => tile.tile.col,
            Axis::Vertical => tile.tile.row,
        }
    }

    fn axis_position(&self, tile: &SlidingTile) -> i32 {
        match self.axis {
            Axis::Horizontal => tile.x,
            Axis::Vertical => tile.y,
        }
    }

    /// Processing order: tiles closest to the edge come first.
    ///
    /// Ties on the scan key are broken by continuous position, then lane.
    #[must_use]
    pub fn scan_order(&self, a: &SlidingTile, b: &SlidingTile) -> Ordering {
        let key = |t: &SlidingTile| (self.scan_key(t), self.axis_position(t), self.lane(t));
        let order = key(a).cmp(&key(b));
        if self.sign < 0 {
            order
        } else {
            order.reverse()
        }
    }

    /// Per-step displacement for a given velocity.
    #[must_use]
    pub fn step_delta(&self, move_velocity: i32) -> (i32, i32) {
        match self.axis {
            Axis::Horizontal => (self.sign * move_velocity, 0),
            Axis::Vertical => (0, self.sign * move_velocity),
        }
    }

    /// Check if the tile already occupies the edge cell.
    #[must_use]
    pub fn is_at_boundary(&self, tile: &SlidingTile, size: usize) -> bool {
        let key = self.scan_key(tile);
        if self.sign < 0 {
            key == 0
        } else {
            key + 1 >= size
        }
    }

    /// Distance from `neighbor` to `tile` along the direction of travel.
    ///
    /// Positive when the neighbor is ahead of the tile.
    #[must_use]
    pub fn gap(&self, tile: &SlidingTile, neighbor: &SlidingTile) -> i32 {
        (self.axis_position(tile) - self.axis_position(neighbor)) * -self.sign
    }

    /// Index of the nearest tile ahead of `tiles[index]` in the same lane.
    #[must_use]
    pub fn neighbor(&self, index: usize, tiles: &[SlidingTile]) -> Option<usize> {
        let tile = &tiles[index];
        let lane = self.lane(tile);
        tiles
            .iter()
            .enumerate()
            .filter(|&(i, other)| i != index && self.lane(other) == lane)
            .map(|(i, other)| (self.gap(tile, other), i))
            .filter(|&(gap, _)| gap > 0)
            .min()
            .map(|(_, i)| i)
    }

    /// Same-valued neighbor still more than one step away: keep stepping.
    #[must_use]
    pub fn still_separated(&self, tile: &SlidingTile, neighbor: &SlidingTile, move_velocity: i32) -> bool {
        self.gap(tile, neighbor) > move_velocity
    }

    /// A full cell of clearance plus one step remains: the tile can advance.
    #[must_use]
    pub fn has_clearance(
        &self,
        tile: &SlidingTile,
        neighbor: &SlidingTile,
        tile_extent: i32,
        move_velocity: i32,
    ) -> bool {
        self.gap(tile, neighbor) >= tile_extent + move_velocity
    }
}
