//! Advisor service: the single owner of the shared state store.
//!
//! All engine state lives behind one mutex together with the random source,
//! so a selection always sees a consistent snapshot and an update is never
//! observable half-applied (e.g. epsilon decayed but memory not yet pushed).

use std::sync::{Mutex, MutexGuard};

use log::info;

use super::config::AdvisorConfig;
use crate::{
    Result,
    adapters::StdRandom,
    engine::{DiagnosticsSnapshot, Learner, Policy, SelectionResult, StateStore},
    error::Error,
    grid::{Cell, GameRecord, HistoricalGame, validate_records},
    ports::{HistorySource, RandomSource},
};

struct AdvisorState {
    store: StateStore,
    rng: Box<dyn RandomSource>,
}

/// Thread-safe front door to the selection engine.
///
/// # Examples
///
/// ```
/// use chicken_advisor::app::{Advisor, AdvisorConfig};
/// use chicken_advisor::grid::GameRecord;
///
/// let advisor = Advisor::new(AdvisorConfig::default().with_seed(42))?;
/// advisor.seed_from_records(&[GameRecord::new(vec![3, 8], vec![8, 20])])?;
///
/// let pick = advisor.select_next_ids(&[])?;
/// advisor.update(pick.cell, true, 1.0)?;
///
/// let snapshot = advisor.diagnostics()?;
/// assert_eq!(snapshot.games_processed, 2);
/// # Ok::<(), chicken_advisor::Error>(())
/// ```
pub struct Advisor {
    policy: Policy,
    learner: Learner,
    diagnostics_top_k: usize,
    state: Mutex<AdvisorState>,
}

impl Advisor {
    /// Create an advisor with a [`StdRandom`] seeded from `config.seed`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the config fails validation.
    pub fn new(config: AdvisorConfig) -> Result<Self> {
        let rng = StdRandom::from_seed(config.seed);
        Self::with_random_source(config, Box::new(rng))
    }

    /// Create an advisor drawing from the given random source.
    pub fn with_random_source(config: AdvisorConfig, rng: Box<dyn RandomSource>) -> Result<Self> {
        let layout = config.validate()?;
        Ok(Self {
            policy: Policy::new(layout, config.exploit_top_k),
            learner: Learner::new(config.learning),
            diagnostics_top_k: config.diagnostics_top_k,
            state: Mutex::new(AdvisorState {
                store: StateStore::new(config.exploration, config.memory_capacity)?,
                rng,
            }),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, AdvisorState>> {
        self.state.lock().map_err(|_| Error::StatePoisoned)
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn learner(&self) -> &Learner {
        &self.learner
    }

    /// Rebuild the store from chronologically ordered history.
    ///
    /// Meant as a one-shot step before serving selections.
    pub fn seed_from_history(&self, games: &[HistoricalGame]) -> Result<()> {
        self.lock()?.store.seed_from_history(games);
        Ok(())
    }

    /// Validate raw records, then seed. Nothing is touched if any record is invalid.
    pub fn seed_from_records(&self, records: &[GameRecord]) -> Result<()> {
        let games = validate_records(records)?;
        self.seed_from_history(&games)
    }

    /// Load history from a source and seed from it. Returns the game count.
    pub fn seed_from_source(&self, source: &dyn HistorySource) -> Result<usize> {
        let games = source.load_games()?;
        self.seed_from_history(&games)?;
        Ok(games.len())
    }

    /// Pick the next cell for a game that has revealed `revealed` so far.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExhaustedBoard`] if all 25 cells are revealed.
    pub fn select_next(&self, revealed: &[Cell]) -> Result<SelectionResult> {
        let mut guard = self.lock()?;
        let AdvisorState { store, rng } = &mut *guard;
        self.policy.select_next(store, revealed, rng.as_mut())
    }

    /// [`Advisor::select_next`] taking raw cell ids.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCell`] for an id outside 1..=25.
    pub fn select_next_ids(&self, revealed: &[usize]) -> Result<SelectionResult> {
        let revealed = revealed
            .iter()
            .map(|&id| Cell::new(id))
            .collect::<Result<Vec<_>>>()?;
        self.select_next(&revealed)
    }

    /// Feed back the resolution of a reveal.
    pub fn update(&self, cell: Cell, was_success: bool, reward: f64) -> Result<()> {
        let mut guard = self.lock()?;
        self.learner
            .update(&mut guard.store, cell, was_success, reward)
    }

    /// [`Advisor::update`] taking a raw cell id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCell`] for an id outside 1..=25; the store is
    /// left unchanged.
    pub fn update_id(&self, cell_id: usize, was_success: bool, reward: f64) -> Result<()> {
        let cell = Cell::new(cell_id)?;
        self.update(cell, was_success, reward)
    }

    /// Snapshot with the configured number of top cells.
    pub fn diagnostics(&self) -> Result<DiagnosticsSnapshot> {
        self.diagnostics_top(self.diagnostics_top_k)
    }

    pub fn diagnostics_top(&self, top_k: usize) -> Result<DiagnosticsSnapshot> {
        Ok(DiagnosticsSnapshot::capture(&self.lock()?.store, top_k))
    }

    /// Run a read-only closure against the store.
    pub fn inspect<T>(&self, f: impl FnOnce(&StateStore) -> T) -> Result<T> {
        Ok(f(&self.lock()?.store))
    }

    /// Wipe all learning. Intended for test and backtest isolation.
    pub fn reset(&self) -> Result<()> {
        self.lock()?.store.initialize();
        info!("Advisor state reset to neutral defaults");
        Ok(())
    }

    /// Restore epsilon to its initial value without touching learned values.
    pub fn reset_exploration(&self) -> Result<()> {
        self.lock()?.store.reset_exploration();
        Ok(())
    }
}
