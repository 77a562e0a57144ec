//! Exploration-rate schedule (epsilon decay)

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Multiplicative epsilon decay bounded below by `min_epsilon`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorationSchedule {
    /// Epsilon after initialization or an explicit reset
    pub initial_epsilon: f64,
    /// Floor epsilon never decays below
    pub min_epsilon: f64,
    /// Factor applied after every completed game
    pub decay_factor: f64,
}

impl Default for ExplorationSchedule {
    fn default() -> Self {
        Self {
            initial_epsilon: 0.30,
            min_epsilon: 0.05,
            decay_factor: 0.995,
        }
    }
}

impl ExplorationSchedule {
    pub fn new(initial_epsilon: f64, min_epsilon: f64, decay_factor: f64) -> Self {
        Self {
            initial_epsilon,
            min_epsilon,
            decay_factor,
        }
    }

    /// One decay step from `epsilon`.
    pub fn decay(&self, epsilon: f64) -> f64 {
        (epsilon * self.decay_factor).max(self.min_epsilon)
    }

    /// Epsilon after `game_count` decay steps from the initial value.
    pub fn after_games(&self, game_count: usize) -> f64 {
        epsilon_from_game_count(
            self.initial_epsilon,
            self.decay_factor,
            self.min_epsilon,
            game_count,
        )
    }

    pub fn validate(&self) -> Result<()> {
        let Self {
            initial_epsilon,
            min_epsilon,
            decay_factor,
        } = *self;
        if !(0.0..=1.0).contains(&min_epsilon)
            || !(0.0..=1.0).contains(&initial_epsilon)
            || min_epsilon > initial_epsilon
        {
            return Err(Error::config(format!(
                "epsilon bounds must satisfy 0 <= min ({min_epsilon}) <= initial ({initial_epsilon}) <= 1"
            )));
        }
        if !(decay_factor > 0.0 && decay_factor <= 1.0) {
            return Err(Error::config(format!(
                "decay factor {decay_factor} must be in (0, 1]"
            )));
        }
        Ok(())
    }
}

/// Epsilon reached by applying `count` multiplicative decays to `initial`,
/// floored at `min`.
///
/// Equivalent to `max(min, initial * decay^count)` for `decay` in (0, 1].
pub fn epsilon_from_game_count(initial: f64, decay: f64, min: f64, count: usize) -> f64 {
    let exponent = i32::try_from(count).unwrap_or(i32::MAX);
    (initial * decay.powi(exponent)).max(min)
}
