//! Observation hooks for move resolution.
//!
//! The engine performs no I/O. Anything that wants to react to a move while
//! it is being resolved (a merge sound, an animation, a frame pacer) plugs
//! in through `MoveObserver`.

use serde::{Deserialize, Serialize};

use super::engine::MergeEvent;
use super::slide::SlidingTile;

/// Receives merge events and step frames from the transition engine.
///
/// Both methods default to doing nothing.
pub trait MoveObserver {
    /// Called exactly once per merge, at the moment it happens.
    fn on_merge(&mut self, _event: &MergeEvent) {}

    /// Called after every step that changed the board, once discrete cells
    /// have been recomputed. A frame pacer may block here.
    fn on_step(&mut self, _step: u32, _tiles: &[SlidingTile]) {}
}

/// Observer that ignores everything (instantaneous resolution).
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl MoveObserver for NoopObserver {}

/// Adapts a closure into a merge-only observer.
pub struct OnMerge<F>(pub F);

impl<F: FnMut(&MergeEvent)> MoveObserver for OnMerge<F> {
    fn on_merge(&mut self, event: &MergeEvent) {
        (self.0)(event)
    }
}

/// One recorded step of a move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub step: u32,
    pub tiles: Vec<SlidingTile>,
}

/// Records every frame and merge of the moves it observes.
#[derive(Clone, Debug, Default)]
pub struct FrameRecorder {
    pub frames: Vec<Frame>,
    pub merges: Vec<MergeEvent>,
}

impl FrameRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
        self.merges.clear();
    }
}

impl MoveObserver for FrameRecorder {
    fn on_merge(&mut self, event: &MergeEvent) {
        self.merges.push(*event);
    }

    fn on_step(&mut self, step: u32, tiles: &[SlidingTile]) {
        self.frames.push(Frame {
            step,
            tiles: tiles.to_vec(),
        });
    }
}
