//! Observer implementations for backtest runs
//!
//! Observers allow composable data collection during a backtest without
//! coupling the replay loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::backtest::BacktestResult;
use crate::{
    Result,
    engine::{FallbackTier, SelectionResult, Strategy},
    error::Error,
    grid::{Cell, Zone},
    ports::Observer,
};

/// One replayed game, as written by [`JsonlObserver`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObservation {
    pub game_num: usize,
    pub cell: Cell,
    pub strategy: Strategy,
    pub zone: Zone,
    pub tier: FallbackTier,
    pub confidence: u8,
    pub epsilon: f64,
    pub value_estimate: f64,
    pub was_success: bool,
}

impl GameObservation {
    fn new(game_num: usize, selection: &SelectionResult, was_success: bool) -> Self {
        Self {
            game_num,
            cell: selection.cell,
            strategy: selection.strategy,
            zone: selection.zone,
            tier: selection.tier,
            confidence: selection.confidence,
            epsilon: selection.epsilon_at_selection,
            value_estimate: selection.value_estimate_at_selection,
            was_success,
        }
    }
}

/// Progress bar observer - Shows backtest progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    safe: usize,
    bones: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            safe: 0,
            bones: 0,
        }
    }

    fn message(&self) -> String {
        format!("{} bones:{}", self.safe, self.bones)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_backtest_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (safe:{msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_outcome(
        &mut self,
        game_num: usize,
        _selection: &SelectionResult,
        was_success: bool,
    ) -> Result<()> {
        if was_success {
            self.safe += 1;
        } else {
            self.bones += 1;
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_backtest_end(&mut self, _result: &BacktestResult) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Hit counts for one selection strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyTally {
    pub picks: usize,
    pub safe: usize,
}

impl StrategyTally {
    pub fn hit_rate(&self) -> f64 {
        if self.picks == 0 {
            0.0
        } else {
            self.safe as f64 / self.picks as f64
        }
    }
}

/// Metrics observer - Tracks hit rates split by strategy and fallback tier
#[derive(Debug, Clone, Default)]
pub struct MetricsObserver {
    explore: StrategyTally,
    exploit: StrategyTally,
    widened: usize,
    total_games: usize,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tally(&self, strategy: Strategy) -> StrategyTally {
        match strategy {
            Strategy::Explore => self.explore,
            Strategy::Exploit => self.exploit,
        }
    }

    /// Overall fraction of safe picks
    pub fn hit_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            (self.explore.safe + self.exploit.safe) as f64 / self.total_games as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.total_games,
            hit_rate: self.hit_rate(),
            explore: self.explore,
            exploit: self.exploit,
            explore_hit_rate: self.explore.hit_rate(),
            exploit_hit_rate: self.exploit.hit_rate(),
            widened_selections: self.widened,
        }
    }
}

/// Summary of backtest metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub hit_rate: f64,
    pub explore: StrategyTally,
    pub exploit: StrategyTally,
    pub explore_hit_rate: f64,
    pub exploit_hit_rate: f64,
    /// Selections that had to drop the anti-repetition constraint
    pub widened_selections: usize,
}

impl Observer for MetricsObserver {
    fn on_outcome(
        &mut self,
        _game_num: usize,
        selection: &SelectionResult,
        was_success: bool,
    ) -> Result<()> {
        self.total_games += 1;
        if !selection.tier.respects_memory() {
            self.widened += 1;
        }
        let tally = match selection.strategy {
            Strategy::Explore => &mut self.explore,
            Strategy::Exploit => &mut self.exploit,
        };
        tally.picks += 1;
        if was_success {
            tally.safe += 1;
        }
        Ok(())
    }
}

/// JSONL observer - Exports one JSON object per replayed game
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create export file {}", path.display()),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_outcome(
        &mut self,
        game_num: usize,
        selection: &SelectionResult,
        was_success: bool,
    ) -> Result<()> {
        let observation = GameObservation::new(game_num, selection, was_success);
        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_backtest_end(&mut self, _result: &BacktestResult) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
