use anyhow::Result;
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::info;
use rust_2048::{Direction, Game, GameBuilder, GameRng, Outcome, SpawnWeight};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    /// Uniformly random direction each turn
    Random,
    /// Direction whose merges create the most value, ties in left/up/right/down order
    Greedy,
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Play a seeded sliding-tile game and print the boards")]
struct Cli {
    /// RNG seed for spawns (and for the random strategy)
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Grid side length
    #[arg(long, default_value_t = 4)]
    size: usize,

    /// Tile value that wins the game
    #[arg(long, default_value_t = 2048)]
    target: u32,

    /// Move selection strategy
    #[arg(long, value_enum, default_value_t = Strategy::Greedy)]
    strategy: Strategy,

    /// Weight of 4 among spawned tiles (2 has weight 1 - this)
    #[arg(long, default_value_t = 0.5)]
    four_probability: f32,

    /// Stop after this many moves
    #[arg(long, default_value_t = 10_000)]
    max_moves: usize,

    /// Print the board after every move
    #[arg(long)]
    verbose: bool,
}

fn greedy_direction(game: &Game) -> Direction {
    let engine = game.engine();
    Direction::ALL
        .iter()
        .map(|&dir| (dir, engine.apply_move(game.board(), dir)))
        .filter(|(_, outcome)| outcome.changed)
        .max_by_key(|(dir, outcome)| {
            // Earlier directions win ties
            let rank = Direction::ALL.iter().rev().position(|d| d == dir).unwrap_or(0);
            (outcome.merged_value(), rank)
        })
        .map_or(Direction::Left, |(dir, _)| dir)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut game = GameBuilder::new()
        .size(cli.size)
        .winning_value(cli.target)
        .instant()
        .spawn_weights(vec![
            SpawnWeight::new(2, 1.0 - cli.four_probability),
            SpawnWeight::new(4, cli.four_probability),
        ])
        .build(cli.seed)?;
    let mut chooser = GameRng::new(cli.seed).fork();

    info!(
        "playing {}x{} to {} with {:?} strategy (seed {})",
        cli.size, cli.size, cli.target, cli.strategy, cli.seed
    );
    if cli.verbose {
        println!("{}", game.board());
    }

    let mut moves = 0;
    while !game.is_over() && moves < cli.max_moves {
        let direction = match cli.strategy {
            Strategy::Random => Direction::ALL[chooser.gen_range_usize(0..Direction::ALL.len())],
            Strategy::Greedy => greedy_direction(&game),
        };
        let report = game.play(direction)?;
        moves += 1;

        if cli.verbose && report.changed {
            println!("{} ({} merges)\n{}", direction, report.merges.len(), game.board());
        }
        if let Some(outcome) = game.take_outcome_announcement() {
            match outcome {
                Outcome::Won => println!("You win!"),
                Outcome::Lost => println!("Game Over!"),
                Outcome::InProgress => {}
            }
        }
    }

    info!(
        "finished after {} moves: {:?}, max tile {}",
        moves,
        game.outcome(),
        game.board().max_value().unwrap_or(0)
    );
    print!("{}", game.board());
    Ok(())
}
