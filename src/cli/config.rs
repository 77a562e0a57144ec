//! Shared configuration for CLI commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use crate::{
    adapters::JsonHistoryFile,
    app::{Advisor, AdvisorConfig},
    grid::HistoricalGame,
    ports::HistorySource,
};

/// Options common to every command
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// JSON file with advisor settings (missing keys use defaults)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Random seed for reproducibility (overrides the config file)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl CommonArgs {
    /// Resolve the advisor configuration from file and flags.
    pub fn advisor_config(&self) -> Result<AdvisorConfig> {
        let mut config = match &self.config {
            Some(path) => AdvisorConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => AdvisorConfig::default(),
        };
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        Ok(config)
    }

    pub fn build_advisor(&self) -> Result<Advisor> {
        let config = self.advisor_config()?;
        Advisor::new(config).context("Invalid advisor configuration")
    }
}

/// Load and validate a history file.
pub fn load_history(path: &Path) -> Result<Vec<HistoricalGame>> {
    JsonHistoryFile::new(path)
        .load_games()
        .with_context(|| format!("Failed to load history from {}", path.display()))
}

/// Build an advisor and, if a history file is given, seed it.
pub fn seeded_advisor(common: &CommonArgs, history: Option<&Path>) -> Result<Advisor> {
    let advisor = common.build_advisor()?;
    if let Some(path) = history {
        let games = load_history(path)?;
        advisor.seed_from_history(&games)?;
    }
    Ok(advisor)
}
