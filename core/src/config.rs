//! Run configuration.
//!
//! Loaded from a JSON file by the runner; every field has a default so a
//! file only needs the values it changes. Command-line flags override
//! file values in the tools crate.

use serde::{Deserialize, Serialize};

use crate::{
    error::{SimError, SimResult},
    goal_model::GoalModelKind,
    league::DEFAULT_EXPECTED,
    outlook::RelegationZone,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Number of simulated seasons.
    pub iterations:       u64,
    /// Worker threads in the simulation pool.
    pub workers:          usize,
    /// Master seed; every iteration's stream derives from it.
    pub seed:             u64,
    pub zone:             RelegationZone,
    pub goal_model:       GoalModelKind,
    /// Expected goals for fixtures that do not specify their own.
    pub default_expected: (f64, f64),
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            iterations:       10_000,
            workers:          default_workers(),
            seed:             42,
            zone:             RelegationZone::default(),
            goal_model:       GoalModelKind::Poisson,
            default_expected: DEFAULT_EXPECTED,
        }
    }
}

impl SimConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: SimConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Small, fast, single-threaded configuration for tests.
    pub fn default_test() -> Self {
        Self {
            iterations: 500,
            workers: 1,
            seed: 0xC0FF_EE00,
            zone: RelegationZone::Bottom(1),
            ..Self::default()
        }
    }

    /// Argument checks that need the league size.
    pub fn validate(&self, team_count: usize) -> SimResult<()> {
        if self.iterations == 0 {
            return Err(SimError::invalid_argument("iterations", "must be at least 1"));
        }
        if self.workers == 0 {
            return Err(SimError::invalid_argument("workers", "must be at least 1"));
        }
        self.zone.validate(team_count)
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
