//! Per-cell value estimates and outcome counters

use serde::{Deserialize, Serialize};

use crate::grid::{CELL_COUNT, Cell};

/// Neutral value estimate assigned to every cell on initialization.
pub const NEUTRAL_VALUE: f64 = 0.5;

/// Empirical success/total counts for one cell.
///
/// Strictly additive: counts are never decremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounter {
    pub success: u64,
    pub total: u64,
}

impl OutcomeCounter {
    pub fn record(&mut self, was_success: bool) {
        self.total += 1;
        if was_success {
            self.success += 1;
        }
    }

    /// `success / total`, or `None` before any outcome is recorded.
    pub fn win_rate(&self) -> Option<f64> {
        (self.total > 0).then(|| self.success as f64 / self.total as f64)
    }
}

/// Value table mapping each cell to a learned "probability safe" in [0,1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueTable {
    values: [f64; CELL_COUNT],
    counters: [OutcomeCounter; CELL_COUNT],
}

impl ValueTable {
    /// Create a table with every estimate at [`NEUTRAL_VALUE`] and empty counters
    pub fn new() -> Self {
        Self {
            values: [NEUTRAL_VALUE; CELL_COUNT],
            counters: [OutcomeCounter::default(); CELL_COUNT],
        }
    }

    pub fn get(&self, cell: Cell) -> f64 {
        self.values[cell.index()]
    }

    /// Set a value estimate, clamped to [0,1]. Non-finite input falls back to neutral.
    pub fn set(&mut self, cell: Cell, value: f64) {
        let value = if value.is_finite() {
            value.clamp(0.0, 1.0)
        } else {
            NEUTRAL_VALUE
        };
        self.values[cell.index()] = value;
    }

    pub fn counter(&self, cell: Cell) -> OutcomeCounter {
        self.counters[cell.index()]
    }

    pub fn record_outcome(&mut self, cell: Cell, was_success: bool) {
        self.counters[cell.index()].record(was_success);
    }

    /// Maximum estimate over all cells, never below `floor`.
    pub fn max_value(&self, floor: f64) -> f64 {
        self.values.iter().copied().fold(floor, f64::max)
    }

    /// All estimates keyed by cell, ascending by cell id.
    pub fn entries(&self) -> impl Iterator<Item = (Cell, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(index, &value)| (Cell::from_index(index), value))
    }

    /// Rank `cells` by estimate, highest first. Ties keep the input order.
    pub fn rank(&self, cells: &[Cell]) -> Vec<Cell> {
        let mut ranked = cells.to_vec();
        ranked.sort_by(|a, b| self.get(*b).total_cmp(&self.get(*a)));
        ranked
    }

    /// Whether every estimate lies in [0,1].
    pub fn is_bounded(&self) -> bool {
        self.values.iter().all(|v| (0.0..=1.0).contains(v))
    }
}

impl Default for ValueTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(id: usize) -> Cell {
        Cell::new(id).unwrap()
    }

    #[test]
    fn test_initialization() {
        let table = ValueTable::new();
        assert!(table.entries().all(|(_, v)| v == NEUTRAL_VALUE));
        assert_eq!(table.counter(cell(4)), OutcomeCounter::default());
    }

    #[test]
    fn test_set_clamps() {
        let mut table = ValueTable::new();
        table.set(cell(1), 1.7);
        table.set(cell(2), -0.3);
        table.set(cell(3), f64::NAN);
        assert_eq!(table.get(cell(1)), 1.0);
        assert_eq!(table.get(cell(2)), 0.0);
        assert_eq!(table.get(cell(3)), NEUTRAL_VALUE);
        assert!(table.is_bounded());
    }

    #[test]
    fn test_max_value_respects_floor() {
        let mut table = ValueTable::new();
        for c in Cell::all() {
            table.set(c, 0.1);
        }
        assert_eq!(table.max_value(0.5), 0.5);

        table.set(cell(9), 0.8);
        assert_eq!(table.max_value(0.5), 0.8);
    }

    #[test]
    fn test_rank_orders_by_value_with_stable_ties() {
        let mut table = ValueTable::new();
        table.set(cell(1), 0.2);
        table.set(cell(3), 0.9);
        table.set(cell(5), 0.5);
        table.set(cell(7), 0.5);

        let ranked = table.rank(&[cell(1), cell(3), cell(5), cell(7)]);
        let ids: Vec<usize> = ranked.into_iter().map(Cell::id).collect();
        assert_eq!(ids, vec![3, 5, 7, 1]);
    }

    #[test]
    fn test_counter_win_rate() {
        let mut table = ValueTable::new();
        assert_eq!(table.counter(cell(2)).win_rate(), None);
        table.record_outcome(cell(2), true);
        table.record_outcome(cell(2), false);
        table.record_outcome(cell(2), true);
        let counter = table.counter(cell(2));
        assert_eq!(counter, OutcomeCounter { success: 2, total: 3 });
        assert!((counter.win_rate().unwrap() - 2.0 / 3.0).abs() < 1e-12);
    }
}
