//! Backtest pipeline: replay recorded games through the live advisor

use std::{fs::File, io::BufWriter, path::Path};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    app::Advisor,
    engine::Strategy,
    error::Error,
    grid::HistoricalGame,
    ports::Observer,
};

use super::observers::MetricsObserver;

/// Backtest configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    /// Wipe the advisor's learning before the first replayed game
    pub reset_before: bool,

    /// Reward magnitude fed to the learner for every resolved pick
    pub reward: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            reset_before: true,
            reward: 1.0,
        }
    }
}

/// Result of a backtest run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Games replayed
    pub total_games: usize,

    /// Picks that landed on a chicken
    pub safe_picks: usize,

    /// Picks that landed on a bone
    pub bone_picks: usize,

    /// `safe_picks / total_games`
    pub hit_rate: f64,

    pub explore_picks: usize,
    pub exploit_picks: usize,

    /// Epsilon after the last update
    pub final_epsilon: f64,
}

impl BacktestResult {
    pub fn new(
        safe_picks: usize,
        bone_picks: usize,
        explore_picks: usize,
        exploit_picks: usize,
        final_epsilon: f64,
    ) -> Self {
        let total_games = safe_picks + bone_picks;
        let hit_rate = if total_games > 0 {
            safe_picks as f64 / total_games as f64
        } else {
            0.0
        };

        Self {
            total_games,
            safe_picks,
            bone_picks,
            hit_rate,
            explore_picks,
            exploit_picks,
            final_epsilon,
        }
    }

    /// Save result to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create result file {}", path.display()),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

/// Replays history game by game: one selection on an empty board, resolved
/// against the recorded bones, then one learner update.
pub struct Backtest {
    config: BacktestConfig,
    observers: Vec<Box<dyn Observer>>,
    metrics: MetricsObserver,
}

impl Backtest {
    pub fn new(config: BacktestConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
            metrics: MetricsObserver::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Per-strategy metrics of the most recent run.
    pub fn metrics(&self) -> &MetricsObserver {
        &self.metrics
    }

    /// Run the backtest against `advisor`.
    ///
    /// # Errors
    ///
    /// Propagates advisor and observer errors.
    pub fn run(&mut self, advisor: &Advisor, games: &[HistoricalGame]) -> Result<BacktestResult> {
        if self.config.reset_before {
            advisor.reset()?;
        }
        self.metrics = MetricsObserver::new();

        for observer in &mut self.observers {
            observer.on_backtest_start(games.len())?;
        }

        let mut safe_picks = 0;
        let mut bone_picks = 0;
        let mut explore_picks = 0;
        let mut exploit_picks = 0;

        for (game_num, game) in games.iter().enumerate() {
            let selection = advisor.select_next(&[])?;
            for observer in &mut self.observers {
                observer.on_selection(game_num, &selection)?;
            }

            match selection.strategy {
                Strategy::Explore => explore_picks += 1,
                Strategy::Exploit => exploit_picks += 1,
            }

            let was_success = !game.is_bone(selection.cell);
            if was_success {
                safe_picks += 1;
            } else {
                bone_picks += 1;
            }
            advisor.update(selection.cell, was_success, self.config.reward)?;

            self.metrics.on_outcome(game_num, &selection, was_success)?;
            for observer in &mut self.observers {
                observer.on_outcome(game_num, &selection, was_success)?;
            }
        }

        let final_epsilon = advisor.inspect(|store| store.epsilon())?;
        let result = BacktestResult::new(
            safe_picks,
            bone_picks,
            explore_picks,
            exploit_picks,
            final_epsilon,
        );

        for observer in &mut self.observers {
            observer.on_backtest_end(&result)?;
        }

        info!(
            "Backtest finished: {}/{} safe picks ({:.1}%), final epsilon {:.4}",
            result.safe_picks,
            result.total_games,
            result.hit_rate * 100.0,
            result.final_epsilon
        );
        Ok(result)
    }
}
