//! Monte Carlo estimation of final league positions and relegation risk.
//!
//! Base standings and the remaining fixtures go in; each iteration plays
//! every fixture with a goal model, ranks the resulting table with
//! head-to-head tie-breaks, and the finishing orders are tallied into a
//! per-team position histogram that is reduced to probabilities.

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod error;
pub mod estimate;
pub mod goal_model;
pub mod league;
pub mod outlook;
pub mod ranking;
pub mod rng;
pub mod season;
pub mod store;
pub mod types;

pub use config::SimConfig;
pub use engine::{calculate_distributions, SimEngine};
pub use error::{SimError, SimResult};
pub use league::{Fixture, League, PlayedMatch, Team};
pub use outlook::{Outlook, RelegationZone, TeamOutlook};
