//! History source port - where historical games come from.
//!
//! The persistence layer (database, exported files) is outside the engine;
//! it only has to hand over games in chronological order.

use crate::{Result, grid::HistoricalGame};

/// Port for loading completed games, oldest first.
///
/// # Examples
///
/// ```
/// use chicken_advisor::adapters::InMemoryHistory;
/// use chicken_advisor::grid::GameRecord;
/// use chicken_advisor::ports::HistorySource;
///
/// let source = InMemoryHistory::new(vec![GameRecord::new(vec![3, 8], vec![8, 20])]);
/// let games = source.load_games()?;
/// assert_eq!(games.len(), 1);
/// # Ok::<(), chicken_advisor::Error>(())
/// ```
pub trait HistorySource {
    /// Load every stored game in chronological order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read or a record
    /// contains cell ids outside 1..=25.
    fn load_games(&self) -> Result<Vec<HistoricalGame>>;
}
