//! Observer port - abstraction for backtest observation and data collection
//!
//! Observers let a backtest report progress, accumulate metrics or export
//! per-game rows without the replay loop knowing about any output format.

use crate::{Result, engine::SelectionResult, pipeline::BacktestResult};

/// Observer trait for monitoring backtest runs
///
/// # Event Sequence
///
/// 1. `on_backtest_start(total_games)` - once
/// 2. For each replayed game:
///    - `on_selection(game_num, selection)`
///    - `on_outcome(game_num, selection, was_success)`
/// 3. `on_backtest_end(result)` - once
///
/// # Examples
///
/// ```no_run
/// use chicken_advisor::{engine::SelectionResult, ports::Observer};
///
/// struct SafeCounter {
///     safe: usize,
/// }
///
/// impl Observer for SafeCounter {
///     fn on_outcome(
///         &mut self,
///         _game_num: usize,
///         _selection: &SelectionResult,
///         was_success: bool,
///     ) -> chicken_advisor::Result<()> {
///         if was_success {
///             self.safe += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first game is replayed.
    fn on_backtest_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called after the advisor picked a cell for a replayed game.
    fn on_selection(&mut self, _game_num: usize, _selection: &SelectionResult) -> Result<()> {
        Ok(())
    }

    /// Called after the pick was resolved against the game's bones and the
    /// learner has been updated.
    fn on_outcome(
        &mut self,
        _game_num: usize,
        _selection: &SelectionResult,
        _was_success: bool,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once after the last game.
    fn on_backtest_end(&mut self, _result: &BacktestResult) -> Result<()> {
        Ok(())
    }
}
