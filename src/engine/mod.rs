//! Adaptive position-selection engine
//!
//! Three cooperating pieces share one [`StateStore`]:
//!
//! - **State store**: per-cell value estimates and outcome counters, the
//!   exploration rate, the recent-safe memory and the last zone used.
//! - **Policy**: epsilon-greedy selection of the next cell, constrained by
//!   zone rotation and anti-repetition, widening through fallback tiers.
//! - **Learner**: Q-learning-style update after each resolved reveal,
//!   followed by multiplicative epsilon decay.
//!
//! ## Usage Example
//!
//! ```
//! use chicken_advisor::adapters::StdRandom;
//! use chicken_advisor::engine::{ExplorationSchedule, Learner, Policy, StateStore};
//! use chicken_advisor::grid::{ZoneLayout, ZoneSpec};
//!
//! let mut store = StateStore::new(ExplorationSchedule::default(), 7)?;
//! let policy = Policy::new(ZoneLayout::from_spec(&ZoneSpec::default())?, 3);
//! let learner = Learner::default();
//! let mut rng = StdRandom::seeded(42);
//!
//! let pick = policy.select_next(&mut store, &[], &mut rng)?;
//! learner.update(&mut store, pick.cell, true, 1.0)?;
//! # Ok::<(), chicken_advisor::Error>(())
//! ```

pub mod diagnostics;
pub mod exploration;
pub mod learner;
pub mod memory;
pub mod policy;
pub mod store;
pub mod value_table;

pub use diagnostics::{CellReport, DEFAULT_DIAGNOSTICS_TOP_K, DiagnosticsSnapshot, WinRate};
pub use exploration::{ExplorationSchedule, epsilon_from_game_count};
pub use learner::{Learner, LearningParams};
pub use memory::{DEFAULT_MEMORY_CAPACITY, RecentSafeMemory};
pub use policy::{
    CandidatePool, DEFAULT_EXPLOIT_TOP_K, FALLBACK_TIERS, FallbackTier, Policy, SelectionResult,
    Strategy,
};
pub use store::StateStore;
pub use value_table::{NEUTRAL_VALUE, OutcomeCounter, ValueTable};
