//! Backtest command - Replay recorded games through the advisor

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        config::{CommonArgs, load_history},
        output::print_backtest,
    },
    pipeline::{Backtest, BacktestConfig, JsonlObserver, ProgressObserver},
};

#[derive(Parser, Debug)]
#[command(about = "Replay recorded games and measure the advisor's hit rate")]
pub struct BacktestArgs {
    /// History file (JSON array of game records), oldest first
    #[arg(long)]
    pub history: PathBuf,

    /// Reward magnitude fed back after every pick
    #[arg(long, default_value_t = 1.0)]
    pub reward: f64,

    /// Earlier games to seed from before the replay; without it the replay
    /// starts from neutral values
    #[arg(long)]
    pub warmup: Option<PathBuf>,

    /// Restore the initial exploration rate after the warmup
    #[arg(long, requires = "warmup")]
    pub reset_exploration: bool,

    /// Write one JSON line per replayed game to this file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Write the final result as JSON to this file
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn execute(args: BacktestArgs) -> Result<()> {
    let games = load_history(&args.history)?;
    let advisor = args.common.build_advisor()?;

    if let Some(path) = &args.warmup {
        let warmup = load_history(path)?;
        advisor.seed_from_history(&warmup)?;
        if args.reset_exploration {
            advisor.reset_exploration()?;
        }
    }

    let config = BacktestConfig {
        reset_before: args.warmup.is_none(),
        reward: args.reward,
    };

    let mut backtest = Backtest::new(config);
    if !args.no_progress {
        backtest = backtest.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.export {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("Failed to open export file {}", path.display()))?;
        backtest = backtest.with_observer(Box::new(observer));
    }

    let result = backtest.run(&advisor, &games)?;
    print_backtest(&result, &backtest.metrics().summary());

    if let Some(path) = &args.export {
        println!("\n✓ Per-game observations exported to: {}", path.display());
    }
    if let Some(path) = &args.output {
        result.save(path)?;
        println!("✓ Result saved to: {}", path.display());
    }
    Ok(())
}
