use std::io;

use anyhow::{ensure, Context};
use clap::{Parser, Subcommand};
use log::warn;
use naval_battle::{
    duel, fleet_profile, init_logging, run_terminal_match, Difficulty, Match, MatchConfig,
    DEFAULT_BOARD_SIZE, SUPPORTED_SIZES,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;

/// Largest board the CLI accepts; anything wider stops fitting a terminal.
const MAX_BOARD_SIZE: usize = 26;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer in the terminal.
    Play {
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: usize,
        #[arg(long, value_enum, default_value_t = Difficulty::Hard)]
        difficulty: Difficulty,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Let the computer clear one random fleet and print a JSON report.
    Duel {
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: usize,
        #[arg(long, value_enum, default_value_t = Difficulty::Hard)]
        difficulty: Difficulty,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Average the shots needed to clear random fleets over many duels.
    Bench {
        #[arg(long, default_value_t = 100)]
        games: usize,
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: usize,
        #[arg(long, value_enum, default_value_t = Difficulty::Hard)]
        difficulty: Difficulty,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

fn check_size(size: usize) -> anyhow::Result<()> {
    ensure!(
        (1..=MAX_BOARD_SIZE).contains(&size),
        "board size must be between 1 and {}",
        MAX_BOARD_SIZE
    );
    if !SUPPORTED_SIZES.contains(&size) {
        warn!(
            "no dedicated fleet for a {}x{} board, using {:?}",
            size,
            size,
            fleet_profile(size)
        );
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            size,
            difficulty,
            seed,
        } => {
            check_size(size)?;
            let config = MatchConfig::for_size(size, difficulty);
            let mut game = Match::new(config, make_rng(seed))?;
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stdout();
            run_terminal_match(&mut game, &mut input, &mut output)?;
        }
        Commands::Duel {
            size,
            difficulty,
            seed,
        } => {
            check_size(size)?;
            let mut rng = make_rng(seed);
            let report = duel(size, fleet_profile(size), difficulty, &mut rng)?;
            println!("{}", serde_json::to_string(&report)?);
        }
        Commands::Bench {
            games,
            size,
            difficulty,
            seed,
        } => {
            check_size(size)?;
            ensure!(games > 0, "at least one game is required");
            let mut rng = make_rng(seed);
            let mut shots = Vec::with_capacity(games);
            let mut cleared = 0;
            for i in 0..games {
                let report = duel(size, fleet_profile(size), difficulty, &mut rng)
                    .with_context(|| format!("game {} could not be set up", i + 1))?;
                shots.push(report.shots);
                if report.cleared {
                    cleared += 1;
                }
            }
            let total: usize = shots.iter().sum();
            let result = json!({
                "difficulty": difficulty,
                "size": size,
                "games": games,
                "cleared": cleared,
                "average_shots": total as f64 / games as f64,
                "min_shots": shots.iter().min(),
                "max_shots": shots.iter().max(),
            });
            println!("{}", serde_json::to_string(&result)?);
        }
    }
    Ok(())
}
