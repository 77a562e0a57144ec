//! Online value update applied after each resolved reveal
//!
//! The game is treated as a one-step bandit per cell: there is no next-state
//! model, so the bootstrap term uses the current global maximum estimate
//! (floored at [`LearningParams::value_floor`]).
//!
//! Q(c) ← Q(c) + α[±r + γ·max(maxQ, floor) − Q(c)], clamped to [0,1]

use log::debug;
use serde::{Deserialize, Serialize};

use super::store::StateStore;
use crate::{
    error::{Error, Result},
    grid::Cell,
};

/// Tunable constants of the update rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningParams {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Lower bound for the bootstrap max-Q term
    pub value_floor: f64,
}

impl Default for LearningParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.9,
            value_floor: 0.5,
        }
    }
}

impl LearningParams {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("learning_rate", self.learning_rate),
            ("discount_factor", self.discount_factor),
            ("value_floor", self.value_floor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::config(format!("{name} {value} must be in [0, 1]")));
            }
        }
        Ok(())
    }
}

/// Applies resolved reveals to a [`StateStore`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Learner {
    params: LearningParams,
}

impl Learner {
    pub fn new(params: LearningParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &LearningParams {
        &self.params
    }

    /// Target value for `cell` without touching the store.
    ///
    /// Infinite rewards saturate at the clamp bounds. A NaN reward carries no
    /// signal and is treated as zero.
    pub fn updated_value(
        &self,
        store: &StateStore,
        cell: Cell,
        was_success: bool,
        reward: f64,
    ) -> f64 {
        let reward = if reward.is_nan() { 0.0 } else { reward };
        let signed_reward = if was_success { reward } else { -reward };
        let current_q = store.value_estimate(cell);
        let max_q = store.values().max_value(self.params.value_floor);
        let td_target = signed_reward + self.params.discount_factor * max_q;
        let new_q = current_q + self.params.learning_rate * (td_target - current_q);
        if new_q.is_nan() {
            // α = 0 with an infinite target
            return current_q;
        }
        new_q.clamp(0.0, 1.0)
    }

    /// Record one resolved reveal.
    ///
    /// Updates the cell's estimate, bumps its outcome counter, pushes it into
    /// the recent-safe memory on success and decays epsilon. Negative rewards
    /// are accepted and simply flip the sign of the signal. Any cell and any
    /// reward is accepted; the `Result` is kept for callers composing with `?`.
    pub fn update(
        &self,
        store: &mut StateStore,
        cell: Cell,
        was_success: bool,
        reward: f64,
    ) -> Result<()> {
        let previous = store.value_estimate(cell);
        let new_q = self.updated_value(store, cell, was_success, reward);
        store.apply_outcome(cell, was_success, new_q);

        debug!(
            "Updated cell {cell} ({}): Q {previous:.4} -> {new_q:.4}, epsilon {:.4}",
            if was_success { "chicken" } else { "bone" },
            store.epsilon()
        );
        Ok(())
    }
}
