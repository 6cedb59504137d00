use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Clotho discrete-time Markov chain simulator.
#[derive(Parser)]
#[command(
    name = "clotho",
    version,
    about = "Discrete-time Markov chain simulator"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Simulate the weather-cycle chain over a fixed horizon.
    Forecast(ForecastArgs),
    /// Run a batch of snake-and-ladder games to absorption.
    Board(BoardArgs),
}

/// Arguments for the `forecast` subcommand.
#[derive(clap::Args)]
pub struct ForecastArgs {
    /// Path to TOML configuration file (built-in defaults if omitted).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override number of simulated days from config.
    #[arg(short, long)]
    pub days: Option<usize>,

    /// Override RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the `board` subcommand.
#[derive(clap::Args)]
pub struct BoardArgs {
    /// Path to TOML configuration file (built-in defaults if omitted).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override number of games from config.
    #[arg(short, long)]
    pub runs: Option<usize>,

    /// Override RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}
