//! Read-only snapshot of the engine for monitoring and backtests

use std::fmt;

use serde::{Serialize, Serializer};

use super::store::StateStore;
use crate::grid::{Cell, Zone};

/// Default number of cells listed in a snapshot.
pub const DEFAULT_DIAGNOSTICS_TOP_K: usize = 5;

/// Empirical win rate of a cell; `N/A` before the cell has any outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WinRate {
    Rate(f64),
    NotAvailable,
}

impl From<Option<f64>> for WinRate {
    fn from(rate: Option<f64>) -> Self {
        rate.map_or(WinRate::NotAvailable, WinRate::Rate)
    }
}

impl fmt::Display for WinRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WinRate::Rate(rate) => f.pad(&format!("{:.1}%", rate * 100.0)),
            WinRate::NotAvailable => f.pad("N/A"),
        }
    }
}

impl Serialize for WinRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            WinRate::Rate(rate) => serializer.serialize_f64(*rate),
            WinRate::NotAvailable => serializer.serialize_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellReport {
    pub cell: Cell,
    pub value_estimate: f64,
    pub success: u64,
    pub total: u64,
    pub win_rate: WinRate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticsSnapshot {
    pub games_processed: u64,
    pub epsilon: f64,
    pub explore_count: u64,
    pub exploit_count: u64,
    pub last_zone: Zone,
    /// Most recent first
    pub memory: Vec<Cell>,
    pub memory_capacity: usize,
    pub top_cells: Vec<CellReport>,
}

impl DiagnosticsSnapshot {
    /// Capture the store; `top_k` cells are listed by descending estimate,
    /// ties by ascending cell id.
    pub fn capture(store: &StateStore, top_k: usize) -> Self {
        let all: Vec<Cell> = Cell::all().collect();
        let top_cells = store
            .values()
            .rank(&all)
            .into_iter()
            .take(top_k)
            .map(|cell| {
                let counter = store.outcome_counter(cell);
                CellReport {
                    cell,
                    value_estimate: store.value_estimate(cell),
                    success: counter.success,
                    total: counter.total,
                    win_rate: counter.win_rate().into(),
                }
            })
            .collect();

        Self {
            games_processed: store.games_processed(),
            epsilon: store.epsilon(),
            explore_count: store.explore_count(),
            exploit_count: store.exploit_count(),
            last_zone: store.last_zone(),
            memory: store.memory().iter().collect(),
            memory_capacity: store.memory().capacity(),
            top_cells,
        }
    }
}
