//! Deterministic random source for tests and replays.
//!
//! Queued draws are consumed first; once a queue runs dry the source keeps
//! returning its default. Indices are reduced modulo the requested length.

use std::collections::VecDeque;

use crate::ports::RandomSource;

/// Scripted random source.
///
/// # Examples
///
/// ```
/// use chicken_advisor::adapters::ScriptedRandom;
/// use chicken_advisor::ports::RandomSource;
///
/// // First draw explores, every later draw exploits; pick index 2 once.
/// let mut rng = ScriptedRandom::exploiting()
///     .with_units([0.0])
///     .with_indices([2]);
/// assert_eq!(rng.next_unit(), 0.0);
/// assert_eq!(rng.next_index(3), 2);
/// assert_eq!(rng.next_index(3), 0);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    units: VecDeque<f64>,
    indices: VecDeque<usize>,
    default_unit: f64,
    default_index: usize,
}

impl ScriptedRandom {
    pub fn new(default_unit: f64, default_index: usize) -> Self {
        Self {
            units: VecDeque::new(),
            indices: VecDeque::new(),
            default_unit,
            default_index,
        }
    }

    /// Unit draws just below 1.0, so EXPLOIT fires for any epsilon.
    pub fn exploiting() -> Self {
        Self::new(1.0 - f64::EPSILON, 0)
    }

    /// Unit draws of 0.0, so EXPLORE fires whenever epsilon is positive.
    pub fn exploring() -> Self {
        Self::new(0.0, 0)
    }

    pub fn with_units(mut self, units: impl IntoIterator<Item = f64>) -> Self {
        self.units.extend(units);
        self
    }

    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(indices);
        self
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(self.default_unit)
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.indices.pop_front().unwrap_or(self.default_index) % len.max(1)
    }
}
