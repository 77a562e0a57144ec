//! The state store: everything the policy reads and the learner writes
//!
//! One [`StateStore`] holds the per-cell value estimates and outcome counters,
//! the exploration rate, the recent-safe memory and the last zone used. It is
//! a plain owned value; sharing across threads is the job of
//! [`crate::app::Advisor`], which guards it with a single mutex so callers
//! never observe a half-applied update.

use std::collections::BTreeMap;

use log::info;

use super::{
    exploration::ExplorationSchedule,
    memory::RecentSafeMemory,
    policy::Strategy,
    value_table::{OutcomeCounter, ValueTable},
};
use crate::{
    error::{Error, Result},
    grid::{Cell, HistoricalGame, Zone},
};

/// Zone recorded as "last used" after initialization, so the first selection
/// targets the upper zone.
const INITIAL_LAST_ZONE: Zone = Zone::Lower;

#[derive(Debug, Clone, PartialEq)]
pub struct StateStore {
    values: ValueTable,
    schedule: ExplorationSchedule,
    epsilon: f64,
    memory: RecentSafeMemory,
    last_zone: Zone,
    games_processed: u64,
    explore_count: u64,
    exploit_count: u64,
}

impl StateStore {
    /// Create an initialized store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the schedule fails
    /// validation or the memory capacity is zero.
    pub fn new(schedule: ExplorationSchedule, memory_capacity: usize) -> Result<Self> {
        schedule.validate()?;
        if memory_capacity == 0 {
            return Err(Error::config("memory_capacity must be at least 1"));
        }
        Ok(Self {
            values: ValueTable::new(),
            schedule,
            epsilon: schedule.initial_epsilon,
            memory: RecentSafeMemory::new(memory_capacity),
            last_zone: INITIAL_LAST_ZONE,
            games_processed: 0,
            explore_count: 0,
            exploit_count: 0,
        })
    }

    /// Wipe all learning back to neutral defaults.
    ///
    /// Idempotent: calling it twice leaves the same contents as calling it once.
    pub fn initialize(&mut self) {
        self.values = ValueTable::new();
        self.epsilon = self.schedule.initial_epsilon;
        self.memory.clear();
        self.last_zone = INITIAL_LAST_ZONE;
        self.games_processed = 0;
        self.explore_count = 0;
        self.exploit_count = 0;
        self.check_invariants();
    }

    /// Rebuild the store from chronologically ordered history.
    ///
    /// For each game the first revealed cell's counter is incremented and its
    /// estimate overwritten with the cumulative empirical win rate. The memory
    /// is rebuilt from the first cells of the most recent successful games and
    /// epsilon is recomputed as if it had decayed once per historical game.
    /// An empty history is equivalent to [`StateStore::initialize`].
    pub fn seed_from_history(&mut self, games: &[HistoricalGame]) {
        self.initialize();
        if games.is_empty() {
            info!("No history to seed from; store left at neutral defaults");
            return;
        }

        for game in games {
            let (Some(first), Some(safe)) = (game.first_cell(), game.first_cell_was_safe()) else {
                continue;
            };
            self.values.record_outcome(first, safe);
            if let Some(rate) = self.values.counter(first).win_rate() {
                self.values.set(first, rate);
            }
        }

        let recent_safe: Vec<Cell> = games
            .iter()
            .rev()
            .filter(|game| game.was_success())
            .filter_map(HistoricalGame::first_cell)
            .take(self.memory.capacity())
            .collect();
        for &cell in recent_safe.iter().rev() {
            self.memory.push(cell);
        }

        self.epsilon = self.schedule.after_games(games.len());
        self.games_processed = games.len() as u64;
        self.check_invariants();

        info!(
            "Seeded state store from {} historical games (epsilon {:.4}, memory {}/{})",
            games.len(),
            self.epsilon,
            self.memory.len(),
            self.memory.capacity()
        );
    }

    pub fn value_estimate(&self, cell: Cell) -> f64 {
        self.values.get(cell)
    }

    pub fn value_estimates(&self) -> BTreeMap<Cell, f64> {
        self.values.entries().collect()
    }

    pub fn outcome_counter(&self, cell: Cell) -> OutcomeCounter {
        self.values.counter(cell)
    }

    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    /// True iff `cell` is remembered and the memory has filled to capacity.
    pub fn is_in_memory(&self, cell: Cell) -> bool {
        self.memory.blocks(cell)
    }

    pub fn push_memory(&mut self, cell: Cell) {
        self.memory.push(cell);
        self.check_invariants();
    }

    pub fn memory(&self) -> &RecentSafeMemory {
        &self.memory
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn schedule(&self) -> &ExplorationSchedule {
        &self.schedule
    }

    pub fn decay_epsilon(&mut self) {
        self.epsilon = self.schedule.decay(self.epsilon);
        self.check_invariants();
    }

    /// Put epsilon back to its initial value. Only used for controlled
    /// backtesting runs.
    pub fn reset_exploration(&mut self) {
        self.epsilon = self.schedule.initial_epsilon;
        self.check_invariants();
    }

    pub fn last_zone(&self) -> Zone {
        self.last_zone
    }

    pub fn flip_zone(&mut self) {
        self.last_zone = self.last_zone.opposite();
    }

    pub(crate) fn set_last_zone(&mut self, zone: Zone) {
        self.last_zone = zone;
    }

    pub fn games_processed(&self) -> u64 {
        self.games_processed
    }

    pub fn explore_count(&self) -> u64 {
        self.explore_count
    }

    pub fn exploit_count(&self) -> u64 {
        self.exploit_count
    }

    pub(crate) fn record_strategy(&mut self, strategy: Strategy) {
        match strategy {
            Strategy::Explore => self.explore_count += 1,
            Strategy::Exploit => self.exploit_count += 1,
        }
    }

    /// Apply one resolved reveal as a single unit: new estimate, counter,
    /// memory push on success, epsilon decay.
    pub(crate) fn apply_outcome(&mut self, cell: Cell, was_success: bool, new_value: f64) {
        self.values.set(cell, new_value);
        self.values.record_outcome(cell, was_success);
        if was_success {
            self.memory.push(cell);
        }
        self.epsilon = self.schedule.decay(self.epsilon);
        self.games_processed += 1;
        self.check_invariants();
    }

    #[cfg(test)]
    pub(crate) fn values_mut(&mut self) -> &mut ValueTable {
        &mut self.values
    }

    fn check_invariants(&self) {
        debug_assert!(self.values.is_bounded(), "value estimate left [0,1]");
        debug_assert!(
            self.memory.len() <= self.memory.capacity(),
            "memory exceeded capacity"
        );
        debug_assert!(
            self.epsilon >= self.schedule.min_epsilon
                && self.epsilon <= self.schedule.initial_epsilon,
            "epsilon {} outside [{}, {}]",
            self.epsilon,
            self.schedule.min_epsilon,
            self.schedule.initial_epsilon
        );
    }
}
