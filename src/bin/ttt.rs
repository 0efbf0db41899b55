//! ttt - train, pit and watch tic-tac-toe agents
//!
//! This CLI provides a unified interface for:
//! - Training the Q-learning agent against a fixed opponent
//! - Running a round-robin tournament between agents
//! - Playing a single game between two agents

use anyhow::Result;
use clap::{Parser, Subcommand};
use tictactoe_agents::cli::commands::{play, tournament, train};
use tracing::debug;

#[derive(Parser)]
#[command(name = "ttt")]
#[command(version, about = "Tic-tac-toe agents: training and tournaments", long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the Q-learning agent
    Train(train::TrainArgs),

    /// Run a round-robin tournament
    Tournament(tournament::TournamentArgs),

    /// Play a single game
    Play(play::PlayArgs),
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    debug!(log_level = %cli.log_level, "Tracing initialized");

    match cli.command {
        Commands::Train(args) => train::execute(args),
        Commands::Tournament(args) => tournament::execute(args),
        Commands::Play(args) => play::execute(args),
    }
}
