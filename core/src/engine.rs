//! The simulation engine, single entry point of the core.
//!
//! EXECUTION ORDER (fixed):
//!   1. Validate configuration and league (once, before any simulation).
//!   2. Fan iterations out over the worker pool (season → ranking).
//!   3. Merge partial histograms.
//!   4. Reduce counts to probabilities.

use std::collections::HashMap;
use std::time::Instant;

use crate::{
    aggregate::{Aggregator, PositionHistogram},
    config::SimConfig,
    error::SimResult,
    goal_model::GoalModel,
    league::{Fixture, League, Team},
    outlook::{Outlook, RelegationZone},
    rng::SeedBank,
    season::PreparedSeason,
};

pub struct SimEngine {
    season: PreparedSeason,
    config: SimConfig,
    model:  Box<dyn GoalModel>,
}

impl SimEngine {
    /// Validate everything up front. Configuration errors surface here,
    /// never from inside a worker.
    pub fn new(league: &League, config: SimConfig) -> SimResult<Self> {
        let season = PreparedSeason::prepare(league)?;
        config.validate(season.team_count())?;
        let model = config.goal_model.build();
        Ok(Self { season, config, model })
    }

    /// Engine with the small test configuration.
    pub fn build_test(league: &League) -> SimResult<Self> {
        Self::new(league, SimConfig::default_test())
    }

    /// Swap in a different goal model.
    pub fn with_model(mut self, model: Box<dyn GoalModel>) -> Self {
        self.model = model;
        self
    }

    pub fn season(&self) -> &PreparedSeason { &self.season }

    pub fn config(&self) -> &SimConfig { &self.config }

    pub fn model_name(&self) -> &'static str { self.model.name() }

    /// Run every iteration and return the combined position histogram.
    pub fn histogram(&self) -> SimResult<PositionHistogram> {
        let aggregator = Aggregator::new(
            &self.season,
            self.model.as_ref(),
            SeedBank::new(self.config.seed),
        );
        aggregator.run(self.config.iterations, self.config.workers)
    }

    /// Run the simulation and reduce it to per-team probabilities.
    pub fn run(&self) -> SimResult<Outlook> {
        log::info!(
            "simulating {} seasons: {} teams, {} fixtures, model={}, workers={}, seed={}",
            self.config.iterations,
            self.season.team_count(),
            self.season.fixtures().len(),
            self.model.name(),
            self.config.workers,
            self.config.seed
        );
        let started = Instant::now();

        let histogram = self.histogram()?;
        let outlook = Outlook::reduce(&histogram, self.season.names(), self.config.zone)?;

        log::info!("simulation finished in {:.2?}", started.elapsed());
        Ok(outlook)
    }
}

/// Relegation probability and position probabilities per team name.
pub type Distributions = (HashMap<String, f64>, HashMap<String, Vec<f64>>);

/// One-call entry point: standings + fixtures in, probability maps out.
/// `spots` counts the relegated positions at the bottom of the table.
pub fn calculate_distributions(
    teams: Vec<Team>,
    fixtures: Vec<Fixture>,
    spots: usize,
    iterations: u64,
    workers: usize,
    seed: u64,
) -> SimResult<Distributions> {
    let config = SimConfig {
        iterations,
        workers,
        seed,
        zone: RelegationZone::Bottom(spots),
        ..SimConfig::default()
    };
    let outlook = SimEngine::new(&League::new(teams, fixtures), config)?.run()?;
    Ok((outlook.relegation_map(), outlook.position_map()))
}
