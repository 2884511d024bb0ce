//! `arena`: run bot tournaments and query the search engine.

use anyhow::{bail, Context, Result};
use arena_othello::{encode_move, Board, Color};
use arena_player::contestants::{Contestant, RandomContestant, SearchContestant};
use arena_tournament::{
    play_round, ArenaConfig, Clock, ContestantKind, Registry, Roster, Standing, SystemClock,
};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Othello tournaments between automated players.
#[derive(Parser, Debug)]
#[command(name = "arena", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a tournament between the configured contestants and print the standings
    Play {
        /// Path to an arena TOML config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of rounds to play
        #[arg(long)]
        rounds: Option<u32>,

        /// Seed for pairing and contestants
        #[arg(long)]
        seed: Option<u64>,

        /// Per-move deadline in milliseconds
        #[arg(long)]
        move_deadline_ms: Option<u64>,

        /// Print standings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the engine's move for a board given as a JSON integer grid
    Suggest {
        /// File holding the grid; reads stdin if omitted
        board: Option<PathBuf>,

        /// Color to move
        #[arg(long, default_value = "black")]
        color: Color,

        /// Seed for the fallback move choice
        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

#[async_std::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Play {
            config,
            rounds,
            seed,
            move_deadline_ms,
            json,
        } => {
            let mut config = match config {
                Some(path) => ArenaConfig::from_file(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => ArenaConfig::default(),
            };
            config.rounds = rounds.unwrap_or(config.rounds);
            config.seed = seed.or(config.seed);
            config.move_deadline_ms = move_deadline_ms.unwrap_or(config.move_deadline_ms);
            config.validate()?;
            play(config, json).await
        }
        Command::Suggest { board, color, seed } => suggest(board, color, seed),
    }
}

async fn play(config: ArenaConfig, json: bool) -> Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let mut registry = Registry::new();
    let tournament = registry.create(&config.tournament, config.move_deadline())?;

    let mut roster = Roster::new();
    for entry in &config.contestants {
        let contestant: Box<dyn Contestant> = match entry.kind {
            ContestantKind::Search => Box::new(SearchContestant::new(entry.name.clone(), rng.gen())),
            ContestantKind::Random => Box::new(RandomContestant::new(entry.name.clone(), rng.gen())),
        };
        tournament.lock().await.join(contestant.name())?;
        roster.add(contestant);
    }
    registry.close(&config.tournament).await?;

    for _ in 0..config.rounds {
        let summary = play_round(&tournament, &mut roster, clock.clone(), &mut rng).await?;
        info!(
            round = summary.round,
            matches = summary.results.len(),
            bench = ?summary.bench,
            "round complete"
        );
    }

    let standings = tournament.lock().await.standings();
    if json {
        println!("{}", serde_json::to_string_pretty(&standings)?);
    } else {
        print_table(&standings);
    }
    Ok(())
}

fn print_table(standings: &[Standing]) {
    println!(
        "{:>4}  {:<16} {:>6} {:>4} {:>4} {:>4} {:>6}",
        "rank", "player", "points", "W", "D", "L", "diff"
    );
    for row in standings {
        println!(
            "{:>4}  {:<16} {:>6} {:>4} {:>4} {:>4} {:>+6}",
            row.rank,
            row.name,
            row.points,
            row.record.wins,
            row.record.draws,
            row.record.losses,
            row.record.piece_differential
        );
    }
}

fn suggest(path: Option<PathBuf>, color: Color, seed: u64) -> Result<()> {
    let input = match path {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            input
        }
    };
    let board: Board = serde_json::from_str(&input).context("parsing board grid")?;
    if board.is_terminal() {
        bail!("the game is over:\n{}", board);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    match arena_player::choose_move(board, color, &mut rng) {
        Some(location) => {
            let (x, y) = encode_move(location);
            println!("{}", serde_json::json!({ "x": x, "y": y, "move": location.to_string() }));
        }
        None => println!("{}", serde_json::json!({ "pass": true })),
    }
    Ok(())
}
