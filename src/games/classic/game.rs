//! Classic game session.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Board, GameError, GameRng, GameRngState, GridConfig, SpawnWeight, Tile};
use crate::rules::{
    outcome, place_random, spawn_tile, Direction, MergeEvent, MoveObserver, NoopObserver, Outcome,
    TransitionEngine,
};

/// What one call to `Game::play` did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub direction: Direction,
    /// False for a no-op move; nothing spawns in that case.
    pub changed: bool,
    pub steps: u32,
    pub merges: SmallVec<[MergeEvent; 8]>,
    pub spawned: Option<Tile>,
    /// Outcome after the move and spawn.
    pub outcome: Outcome,
}

/// Captured session state: board, RNG position and announcement flag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub config: GridConfig,
    pub board: Board,
    pub rng: GameRngState,
    pub outcome_announced: bool,
}

/// A single-player game: board, RNG and configuration.
#[derive(Clone, Debug)]
pub struct Game {
    config: GridConfig,
    engine: TransitionEngine,
    board: Board,
    rng: GameRng,
    /// Set once the terminal outcome has been handed out.
    outcome_announced: bool,
}

/// Builder for creating a Game.
#[derive(Clone, Debug, Default)]
pub struct GameBuilder {
    config: GridConfig,
}

impl GameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn size(mut self, size: usize) -> Self {
        self.config.size = size;
        self
    }

    #[must_use]
    pub fn winning_value(mut self, value: u32) -> Self {
        self.config.winning_value = value;
        self
    }

    /// Position units per cell and per step.
    #[must_use]
    pub fn resolution(mut self, tile_extent: i32, move_velocity: i32) -> Self {
        self.config.tile_extent = tile_extent;
        self.config.move_velocity = move_velocity;
        self
    }

    /// Resolve moves a whole cell per step.
    #[must_use]
    pub fn instant(self) -> Self {
        self.resolution(1, 1)
    }

    #[must_use]
    pub fn starting_tiles(mut self, count: usize, value: u32) -> Self {
        self.config.starting_tiles = count;
        self.config.starting_value = value;
        self
    }

    #[must_use]
    pub fn spawn_weights(mut self, weights: Vec<SpawnWeight>) -> Self {
        self.config.spawn_weights = weights;
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the game and place the starting tiles.
    pub fn build(self, seed: u64) -> Result<Game, GameError> {
        Game::new(self.config, seed)
    }
}

impl Game {
    /// Create a game with starting tiles placed from a seeded RNG.
    pub fn new(config: GridConfig, seed: u64) -> Result<Self, GameError> {
        let engine = TransitionEngine::from_config(&config)?;
        let mut game = Self {
            board: Board::new(config.size),
            config,
            engine,
            rng: GameRng::new(seed),
            outcome_announced: false,
        };
        game.place_starting_tiles()?;
        Ok(game)
    }

    /// Start a session from an existing board (no starting tiles placed).
    pub fn with_board(config: GridConfig, board: Board, seed: u64) -> Result<Self, GameError> {
        let engine = TransitionEngine::from_config(&config)?;
        if board.size() != config.size {
            return Err(GameError::InvalidConfig(format!(
                "board size {} does not match configured size {}",
                board.size(),
                config.size
            )));
        }
        Ok(Self {
            config,
            engine,
            board,
            rng: GameRng::new(seed),
            outcome_announced: false,
        })
    }

    fn place_starting_tiles(&mut self) -> Result<(), GameError> {
        for _ in 0..self.config.starting_tiles {
            place_random(&mut self.board, &mut self.rng, self.config.starting_value)?;
        }
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn engine(&self) -> &TransitionEngine {
        &self.engine
    }

    /// Current outcome, recomputed from the board.
    pub fn outcome(&self) -> Outcome {
        outcome(&self.board, self.config.winning_value)
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_terminal()
    }

    /// Play one move.
    ///
    /// Rejected with `GameFinished` once the outcome is terminal. A move that
    /// changes the board is followed by exactly one spawn; a no-op move
    /// spawns nothing.
    pub fn play(&mut self, direction: Direction) -> Result<MoveReport, GameError> {
        self.play_observed(direction, &mut NoopObserver)
    }

    /// Play one move, reporting merges and steps to `observer`.
    pub fn play_observed<O: MoveObserver + ?Sized>(
        &mut self,
        direction: Direction,
        observer: &mut O,
    ) -> Result<MoveReport, GameError> {
        let current = self.outcome();
        if current.is_terminal() {
            return Err(GameError::GameFinished(current));
        }

        let moved = self.engine.apply_move_observed(&self.board, direction, observer);
        self.board = moved.board;

        let spawned = if moved.changed {
            Some(spawn_tile(&mut self.board, &mut self.rng, &self.config.spawn_weights)?)
        } else {
            debug!("{} is a no-op, nothing spawned", direction);
            None
        };

        Ok(MoveReport {
            direction,
            changed: moved.changed,
            steps: moved.steps,
            merges: moved.merges,
            spawned,
            outcome: self.outcome(),
        })
    }

    /// Terminal outcome, handed out exactly once per game.
    ///
    /// Callers use this to trigger one-off effects such as an end-of-game
    /// sound.
    pub fn take_outcome_announcement(&mut self) -> Option<Outcome> {
        let current = self.outcome();
        if !current.is_terminal() || self.outcome_announced {
            return None;
        }
        self.outcome_announced = true;
        info!(
            "game over: {:?} (max tile {})",
            current,
            self.board.max_value().unwrap_or(0)
        );
        Some(current)
    }

    /// Discard the board and start over with fresh starting tiles.
    ///
    /// The RNG continues its stream, so consecutive games differ.
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.board = Board::new(self.config.size);
        self.outcome_announced = false;
        self.place_starting_tiles()?;
        info!("restarted {}x{} game", self.config.size, self.config.size);
        Ok(())
    }

    /// Capture the session for later restore.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            config: self.config.clone(),
            board: self.board.clone(),
            rng: self.rng.state(),
            outcome_announced: self.outcome_announced,
        }
    }

    /// Restore a session captured by `snapshot`.
    pub fn from_snapshot(snapshot: GameSnapshot) -> Result<Self, GameError> {
        let engine = TransitionEngine::from_config(&snapshot.config)?;
        if snapshot.board.size() != snapshot.config.size {
            return Err(GameError::InvalidConfig(format!(
                "board size {} does not match configured size {}",
                snapshot.board.size(),
                snapshot.config.size
            )));
        }
        Ok(Self {
            engine,
            board: snapshot.board,
            rng: GameRng::from_state(&snapshot.rng),
            outcome_announced: snapshot.outcome_announced,
            config: snapshot.config,
        })
    }

    /// Independent copy for what-if play.
    ///
    /// Takes `&mut self` because forking the RNG advances the fork counter.
    pub fn fork(&mut self) -> Self {
        Self {
            config: self.config.clone(),
            engine: self.engine,
            board: self.board.clone(),
            rng: self.rng.fork(),
            outcome_announced: self.outcome_announced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{is_board_full, OnMerge};

    #[test]
    fn test_game_creation() {
        let game = GameBuilder::new().build(42).unwrap();

        assert_eq!(game.board().size(), 4);
        assert_eq!(game.board().len(), 2);
        assert!(game.board().tiles().all(|t| t.value == 2));
        assert_eq!(game.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_builder_rejects_bad_config() {
        let result = GameBuilder::new().resolution(200, 30).build(1);
        assert!(matches!(result, Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_play_spawns_after_change() {
        let board = Board::from_rows(&[[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut game = Game::with_board(GridConfig::default(), board, 5).unwrap();

        let report = game.play(Direction::Left).unwrap();
        assert!(report.changed);
        assert!(report.spawned.is_some());
        assert_eq!(game.board().len(), 2);
    }

    #[test]
    fn test_no_op_does_not_spawn() {
        let board = Board::from_rows(&[[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut game = Game::with_board(GridConfig::default(), board.clone(), 5).unwrap();

        let report = game.play(Direction::Left).unwrap();
        assert!(!report.changed);
        assert_eq!(report.spawned, None);
        assert_eq!(game.board(), &board);
    }

    #[test]
    fn test_merge_hook_fires_once_per_merge() {
        let board = Board::from_rows(&[[2, 2, 4, 4], [8, 8, 0, 0], [0; 4], [0; 4]]).unwrap();
        let mut game = Game::with_board(GridConfig::default(), board, 5).unwrap();

        let mut heard = Vec::new();
        let report = game
            .play_observed(Direction::Left, &mut OnMerge(|e: &MergeEvent| heard.push(e.value)))
            .unwrap();

        heard.sort_unstable();
        assert_eq!(heard, vec![4, 8, 16]);
        assert_eq!(report.merges.len(), 3);
    }

    #[test]
    fn test_finished_game_rejects_moves() {
        let board = Board::from_rows(&[[2048, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut game = Game::with_board(GridConfig::default(), board, 5).unwrap();

        assert_eq!(game.outcome(), Outcome::Won);
        assert_eq!(
            game.play(Direction::Right),
            Err(GameError::GameFinished(Outcome::Won))
        );
    }

    #[test]
    fn test_outcome_announced_once() {
        let board = Board::from_rows(&[[2, 4], [4, 2]]).unwrap();
        let config = GridConfig::new(2);
        let mut game = Game::with_board(config, board, 5).unwrap();

        assert_eq!(game.take_outcome_announcement(), Some(Outcome::Lost));
        assert_eq!(game.take_outcome_announcement(), None);

        game.restart().unwrap();
        assert_eq!(game.board().len(), 2);
        assert_eq!(game.take_outcome_announcement(), None);
    }

    #[test]
    fn test_win_by_merging() {
        let board = Board::from_rows(&[[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut game = Game::with_board(GridConfig::default(), board, 5).unwrap();

        let report = game.play(Direction::Left).unwrap();
        assert_eq!(report.outcome, Outcome::Won);
        assert_eq!(game.take_outcome_announcement(), Some(Outcome::Won));
    }

    #[test]
    fn test_game_to_completion() {
        let mut game = GameBuilder::new().instant().build(42).unwrap();
        let mut turns = 0;
        const MAX_TURNS: usize = 100_000;

        while !game.is_over() && turns < MAX_TURNS {
            // Cycle directions; a full rotation of no-ops cannot happen on
            // a board that is not full.
            let direction = Direction::ALL[turns % 4];
            game.play(direction).unwrap();
            turns += 1;
        }

        assert!(game.is_over(), "game should have ended");
        if game.outcome() == Outcome::Lost {
            assert!(is_board_full(game.board()));
        }
    }

    #[test]
    fn test_deterministic_replay() {
        let moves = [Direction::Left, Direction::Up, Direction::Right, Direction::Down];
        let mut a = GameBuilder::new().build(12345).unwrap();
        let mut b = GameBuilder::new().instant().build(12345).unwrap();

        for i in 0..40 {
            if a.is_over() {
                break;
            }
            let dir = moves[i % 4];
            let ra = a.play(dir).unwrap();
            let rb = b.play(dir).unwrap();
            assert_eq!(ra.spawned, rb.spawned);
        }
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn test_snapshot_restore() {
        let mut game = GameBuilder::new().build(7).unwrap();
        game.play(Direction::Left).unwrap();
        game.play(Direction::Up).unwrap();

        let snapshot = game.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored_snapshot: GameSnapshot = serde_json::from_str(&json).unwrap();
        let mut restored = Game::from_snapshot(restored_snapshot).unwrap();

        for dir in [Direction::Right, Direction::Down, Direction::Left] {
            if game.is_over() {
                break;
            }
            assert_eq!(game.play(dir).unwrap(), restored.play(dir).unwrap());
        }
        assert_eq!(game.board(), restored.board());
    }

    #[test]
    fn test_fork_is_independent() {
        let mut game = GameBuilder::new().build(99).unwrap();
        let before = game.board().clone();

        let mut branch = game.fork();
        branch.play(Direction::Down).unwrap();

        assert_eq!(game.board(), &before);
    }

    #[test]
    fn test_builder_settings_reach_the_game() {
        let game = GameBuilder::new()
            .size(5)
            .winning_value(512)
            .resolution(100, 25)
            .starting_tiles(3, 4)
            .spawn_weights(vec![SpawnWeight::new(2, 1.0)])
            .build(8)
            .unwrap();

        assert_eq!(game.board().size(), 5);
        assert_eq!(game.config().winning_value, 512);
        assert_eq!(game.engine().tile_extent(), 100);
        assert_eq!(game.engine().move_velocity(), 25);
        assert_eq!(game.board().len(), 3);
        assert!(game.board().tiles().all(|t| t.value == 4));
        assert_eq!(game.config().spawn_weights, vec![SpawnWeight::new(2, 1.0)]);
    }
}

