//! Tictac-Rust: N x N tic-tac-toe in the terminal.
//!
//! ## Usage
//!
//! - `tictac-rust` - Play a 3x3 game against the engine
//! - `tictac-rust play --size 4 --depth 4` - Bigger board, bounded search
//! - `tictac-rust hotseat` - Two people at one terminal
//! - `tictac-rust selfplay` - Engine against a random mover
//! - `tictac-rust demo` - Show the engine's scores for a position

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use tictac_rust::board::{Board, Mark};
use tictac_rust::constants::{
    DEFAULT_HUMAN_NAME, DEFAULT_SEED, DEFAULT_SELFPLAY_GAMES, DEFAULT_SIZE,
};
use tictac_rust::game::{Game, MatchConfig, Mode, TextGame, render};
use tictac_rust::moves::label;
use tictac_rust::player::Participant;
use tictac_rust::playout::versus_random;
use tictac_rust::search::SearchEngine;

/// Tictac-Rust: N x N tic-tac-toe with a minimax engine
#[derive(Parser)]
#[command(name = "tictac-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine
    Play {
        /// Board side
        #[arg(short, long, default_value_t = DEFAULT_SIZE)]
        size: usize,
        /// Search depth in plies (searches to game end when unset)
        #[arg(short, long)]
        depth: Option<usize>,
        /// Your name
        #[arg(short, long, default_value = DEFAULT_HUMAN_NAME)]
        name: String,
        /// Let the engine open
        #[arg(long)]
        second: bool,
    },
    /// Two humans taking turns at one terminal
    Hotseat {
        #[arg(short, long, default_value_t = DEFAULT_SIZE)]
        size: usize,
        #[arg(long, default_value = "Player1")]
        first: String,
        #[arg(long, default_value = "Player2")]
        second: String,
    },
    /// Play the engine against a random mover and print the tally
    Selfplay {
        #[arg(short, long, default_value_t = DEFAULT_SIZE)]
        size: usize,
        #[arg(short, long)]
        depth: Option<usize>,
        #[arg(short, long, default_value_t = DEFAULT_SELFPLAY_GAMES)]
        games: usize,
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
    /// Print the engine's score for every move in a position
    Demo {
        /// Board such as "X.. .O. ..." (empty 3x3 when omitted)
        position: Option<String>,
        #[arg(short, long)]
        depth: Option<usize>,
    },
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Some(Commands::Play {
            size,
            depth,
            name,
            second,
        }) => play(MatchConfig {
            size,
            depth,
            mode: Mode::VsComputer {
                name,
                human_first: !second,
            },
        }),
        Some(Commands::Hotseat {
            size,
            first,
            second,
        }) => play(MatchConfig {
            size,
            depth: None,
            mode: Mode::Hotseat { first, second },
        }),
        Some(Commands::Selfplay {
            size,
            depth,
            games,
            seed,
        }) => selfplay(size, depth, games, seed),
        Some(Commands::Demo { position, depth }) => demo(position.as_deref(), depth),
        None => play(MatchConfig::default()),
    }
}

fn play(config: MatchConfig) -> Result<()> {
    let game = Game::from_config(&config).context("invalid match configuration")?;
    let stdin = io::stdin();
    let mut text = TextGame::new(game, stdin.lock(), io::stdout());
    text.run()?;
    Ok(())
}

fn selfplay(size: usize, depth: Option<usize>, games: usize, seed: u64) -> Result<()> {
    let tally = versus_random(size, depth, games, seed)?;
    println!(
        "{} games on {size}x{size}: engine {} / random {} / draws {}",
        tally.games(),
        tally.engine_wins,
        tally.random_wins,
        tally.draws
    );
    Ok(())
}

fn demo(position: Option<&str>, depth: Option<usize>) -> Result<()> {
    let board = match position {
        Some(s) => s.parse::<Board>().context("invalid position")?,
        None => Board::new(DEFAULT_SIZE)?,
    };
    // With equal counts X is assumed to be on move.
    let mover = board.next_marks().first().copied().unwrap_or(Mark::X);
    let ai = Participant::automated(mover);
    let engine = match depth {
        Some(depth) => SearchEngine::with_depth(&board, &ai, depth)?,
        None => SearchEngine::new(&board, &ai)?,
    };

    println!("{}", render(&board));
    println!("{mover} to move, depth {:?}", engine.max_depth());
    for (mv, score) in engine.root_scores()? {
        println!("  cell {:>3}: {score}", label(mv.index()));
    }
    let report = engine.search()?;
    println!(
        "Best move: {} (score {}, {} nodes)",
        label(report.best.index()),
        report.score,
        report.nodes
    );
    Ok(())
}
