//! Chicken advisor CLI
//!
//! This CLI provides a unified interface for:
//! - Suggesting the next cell to reveal, optionally seeded from history
//! - Backtesting the advisor against recorded games
//! - Inspecting learned values and exploration state
//!
//! Set `RUST_LOG=debug` to trace every selection and update.

use anyhow::Result;
use chicken_advisor::cli::commands::{backtest, diagnostics, suggest};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "advisor")]
#[command(version, about = "Adaptive cell advisor for the chickens-and-bones game", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest the next cell to reveal
    Suggest(suggest::SuggestArgs),

    /// Replay recorded games and measure the hit rate
    Backtest(backtest::BacktestArgs),

    /// Show learned values and exploration state
    Diagnostics(diagnostics::DiagnosticsArgs),
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));
    let cli = Cli::parse();

    match cli.command {
        Commands::Suggest(args) => suggest::execute(args),
        Commands::Backtest(args) => backtest::execute(args),
        Commands::Diagnostics(args) => diagnostics::execute(args),
    }
}
