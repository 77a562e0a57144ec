//! Configuration types for advisor creation.

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    engine::{
        DEFAULT_DIAGNOSTICS_TOP_K, DEFAULT_EXPLOIT_TOP_K, DEFAULT_MEMORY_CAPACITY,
        ExplorationSchedule, LearningParams,
    },
    error::Error,
    grid::{ZoneLayout, ZoneSpec},
};

/// Configuration for creating an [`crate::app::Advisor`].
///
/// Every field has a default, so a JSON config only needs the keys it
/// overrides.
///
/// # Examples
///
/// ```
/// use chicken_advisor::app::AdvisorConfig;
/// use chicken_advisor::engine::ExplorationSchedule;
///
/// let config = AdvisorConfig::default()
///     .with_seed(42)
///     .with_memory_capacity(5)
///     .with_exploration(ExplorationSchedule::new(0.2, 0.05, 0.99));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Constants of the value update rule
    pub learning: LearningParams,
    /// Epsilon bounds and decay
    pub exploration: ExplorationSchedule,
    /// Size of the recent-safe memory
    pub memory_capacity: usize,
    /// Size of the top slice EXPLOIT picks from
    pub exploit_top_k: usize,
    /// Cells listed in diagnostics snapshots
    pub diagnostics_top_k: usize,
    /// Zone partition and preferred cells
    pub zones: ZoneSpec,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            learning: LearningParams::default(),
            exploration: ExplorationSchedule::default(),
            memory_capacity: DEFAULT_MEMORY_CAPACITY,
            exploit_top_k: DEFAULT_EXPLOIT_TOP_K,
            diagnostics_top_k: DEFAULT_DIAGNOSTICS_TOP_K,
            zones: ZoneSpec::default(),
            seed: None,
        }
    }
}

impl AdvisorConfig {
    /// Load a config from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config file {}", path.display()),
            source,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn with_learning(mut self, learning: LearningParams) -> Self {
        self.learning = learning;
        self
    }

    pub fn with_exploration(mut self, exploration: ExplorationSchedule) -> Self {
        self.exploration = exploration;
        self
    }

    pub fn with_memory_capacity(mut self, capacity: usize) -> Self {
        self.memory_capacity = capacity;
        self
    }

    pub fn with_exploit_top_k(mut self, top_k: usize) -> Self {
        self.exploit_top_k = top_k;
        self
    }

    pub fn with_diagnostics_top_k(mut self, top_k: usize) -> Self {
        self.diagnostics_top_k = top_k;
        self
    }

    pub fn with_zones(mut self, zones: ZoneSpec) -> Self {
        self.zones = zones;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every parameter and build the zone layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] describing the first problem.
    pub fn validate(&self) -> Result<ZoneLayout> {
        self.learning.validate()?;
        self.exploration.validate()?;
        if self.memory_capacity == 0 {
            return Err(Error::config("memory_capacity must be at least 1"));
        }
        if self.exploit_top_k == 0 {
            return Err(Error::config("exploit_top_k must be at least 1"));
        }
        if self.diagnostics_top_k == 0 {
            return Err(Error::config("diagnostics_top_k must be at least 1"));
        }
        ZoneLayout::from_spec(&self.zones)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdvisorConfig::default();
        assert_eq!(config.learning.learning_rate, 0.1);
        assert_eq!(config.learning.discount_factor, 0.9);
        assert_eq!(config.exploration.initial_epsilon, 0.30);
        assert_eq!(config.exploration.min_epsilon, 0.05);
        assert_eq!(config.exploration.decay_factor, 0.995);
        assert_eq!(config.memory_capacity, 7);
        assert_eq!(config.exploit_top_k, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"memory_capacity": 4, "exploration": {{"initial_epsilon": 0.5, "min_epsilon": 0.1, "decay_factor": 0.9}}}}"#
        )
        .unwrap();

        let config = AdvisorConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.memory_capacity, 4);
        assert_eq!(config.exploration.initial_epsilon, 0.5);
        assert_eq!(config.exploit_top_k, 3);
        assert_eq!(config.zones, ZoneSpec::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(
            AdvisorConfig::default()
                .with_memory_capacity(0)
                .validate()
                .is_err()
        );
        assert!(
            AdvisorConfig::default()
                .with_exploit_top_k(0)
                .validate()
                .is_err()
        );

        let overlapping = ZoneSpec {
            upper: (1..=20).collect(),
            ..ZoneSpec::default()
        };
        assert!(matches!(
            AdvisorConfig::default().with_zones(overlapping).validate(),
            Err(Error::InvalidConfiguration { .. })
        ));
    }
}
