use thiserror::Error;

use crate::types::Iteration;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // ── Configuration errors (detected once, before any simulation) ──
    #[error("{context} #{index} references unknown team '{team}'")]
    UnknownTeam {
        context: &'static str,
        index:   usize,
        team:    String,
    },

    #[error("{context} #{index} pits '{team}' against itself")]
    SelfFixture {
        context: &'static str,
        index:   usize,
        team:    String,
    },

    #[error("Team '{team}' appears more than once in the standings")]
    DuplicateTeam { team: String },

    #[error("Expected-goals rate must be finite and > 0, got {rate}")]
    InvalidRate { rate: f64 },

    // ── Invalid arguments ─────────────────────────────────────────
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        name:   &'static str,
        reason: String,
    },

    // ── Failures while the aggregation is running ─────────────────
    #[error("Simulation failed at iteration {iteration}: {reason}")]
    SimulationFailure {
        iteration: Iteration,
        reason:    String,
    },

    #[error("{counter} overflowed while recording a match")]
    CounterOverflow { counter: &'static str },

    #[error("Worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SimError {
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument { name, reason: reason.into() }
    }

    /// True for the errors that are raised by input validation.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownTeam { .. }
                | Self::SelfFixture { .. }
                | Self::DuplicateTeam { .. }
                | Self::InvalidRate { .. }
        )
    }
}

pub type SimResult<T> = Result<T, SimError>;
