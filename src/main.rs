//! Console version of the game.
//!
//! ```text
//! isolation --player1 Ada --player2 Grace --seed 7
//! ```
//!
//! Set `RUST_LOG=debug` to see engine logs on stderr.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use rust_isolation::core::{DEFAULT_COLS, DEFAULT_ROWS};
use rust_isolation::scores::DEFAULT_SCORES_FILE;
use rust_isolation::{BoardEngine, ConsoleGame, GameConfig, GameSession, PlayerMap, ScoreBoard};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "isolation", about = "Two-player king-move blocking game")]
struct Cli {
    /// Number of board rows
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,

    /// Number of board columns
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: usize,

    /// Seed for square blocking (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Score file
    #[arg(long, default_value = DEFAULT_SCORES_FILE)]
    scores: PathBuf,

    /// Display name of the first player
    #[arg(long, default_value = "Player 1")]
    player1: String,

    /// Display name of the second player
    #[arg(long, default_value = "Player 2")]
    player2: String,

    /// Print the scoreboard and exit
    #[arg(long)]
    show_scores: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let scores = ScoreBoard::load(&cli.scores)?;

    if cli.show_scores {
        for (name, wins) in scores.ranking() {
            println!("{name}: {wins}");
        }
        return Ok(());
    }

    let config = GameConfig::default()
        .with_size(cli.rows, cli.cols)
        .with_seed(cli.seed.unwrap_or_else(rand::random));
    info!(?config, "Starting console game");

    let engine = BoardEngine::new(config)?;
    let session = GameSession::new(engine, PlayerMap::from_pair(cli.player1, cli.player2), scores);

    let stdin = io::stdin();
    let mut game = ConsoleGame::new(session, stdin.lock(), io::stdout());
    if game.run()?.is_none() {
        println!("Game abandoned.");
    }
    Ok(())
}
