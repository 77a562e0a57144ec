//! In-memory history source for tests and embedding callers.

use crate::{
    Result,
    grid::{GameRecord, HistoricalGame, validate_records},
    ports::HistorySource,
};

/// History held in memory, oldest game first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistory {
    records: Vec<GameRecord>,
}

impl InMemoryHistory {
    pub fn new(records: Vec<GameRecord>) -> Self {
        Self { records }
    }

    /// Append a finished game.
    pub fn push(&mut self, record: GameRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl HistorySource for InMemoryHistory {
    fn load_games(&self) -> Result<Vec<HistoricalGame>> {
        validate_records(&self.records)
    }
}
