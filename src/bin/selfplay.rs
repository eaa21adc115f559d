//! Plays computer-vs-computer games and prints the tally.
//!
//! Usage: cargo run --release --features cli --bin selfplay -- --black hard --white normal --games 10

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use reversi_engine::{AiConfig, Difficulty, DifficultyPolicy, GameEngine, Player, Winner};

#[derive(Parser, Debug)]
#[command(name = "selfplay")]
#[command(about = "Pit two difficulty tiers against each other")]
struct Args {
    /// Tier playing black (easy, normal, hard)
    #[arg(long, default_value = "hard")]
    black: Difficulty,
    /// Tier playing white (easy, normal, hard)
    #[arg(long, default_value = "normal")]
    white: Difficulty,
    #[arg(long, default_value_t = 10)]
    games: usize,
    /// Base seed for the easy tier; game `n` uses `seed + n`
    #[arg(long)]
    seed: Option<u64>,
    /// Print the final board of every game
    #[arg(long)]
    show_board: bool,
}

#[derive(Debug, Default)]
struct Tally {
    black: usize,
    white: usize,
    draws: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if args.games == 0 {
        bail!("--games must be at least 1");
    }

    tracing::info!(
        "Starting self-play: {} (black) vs {} (white), {} games",
        args.black,
        args.white,
        args.games
    );

    let mut tally = Tally::default();
    for game_num in 0..args.games {
        let engine = play_game(&args, game_num)
            .with_context(|| format!("game {} did not finish", game_num + 1))?;
        let result = engine
            .result()
            .context("finished game has no result")?;

        match result.winner {
            Winner::Black => tally.black += 1,
            Winner::White => tally.white += 1,
            Winner::Draw => tally.draws += 1,
        }
        println!(
            "Game {}: {:?} ({}-{})",
            game_num + 1,
            result.winner,
            result.black_score,
            result.white_score
        );
        if args.show_board {
            println!("{}", engine.board());
        }
    }

    println!(
        "black {} wins, white {} wins, {} draws",
        tally.black, tally.white, tally.draws
    );
    Ok(())
}

fn play_game(args: &Args, game_num: usize) -> Result<GameEngine> {
    let config_for = |difficulty: Difficulty, offset: u64| {
        let config = AiConfig::new(difficulty);
        match args.seed {
            Some(seed) => config.with_seed(seed.wrapping_add(game_num as u64 * 2 + offset)),
            None => config,
        }
    };
    let mut black = DifficultyPolicy::new(&config_for(args.black, 0));
    let mut white = DifficultyPolicy::new(&config_for(args.white, 1));
    let mut engine = GameEngine::new();

    while !engine.is_game_over() {
        let ai = match engine.current_player() {
            Player::Black => &mut black,
            Player::White => &mut white,
        };
        if engine.play_selected(ai).is_none() {
            bail!("{:?} found no move in a running game", engine.current_player());
        }
    }

    Ok(engine)
}
