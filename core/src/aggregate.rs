//! Parallel aggregation of simulated seasons into a position histogram.
//!
//! RULES:
//!   - Workers share only read-only inputs (season, goal model, seed bank).
//!   - Iteration i always draws from SeedBank::for_iteration(i), so the
//!     combined histogram does not depend on worker count or scheduling.
//!   - Partial histograms are merged by addition; any failed iteration
//!     fails the whole run and no partial histogram escapes.

use std::time::Instant;

use rayon::prelude::*;

use crate::{
    error::{SimError, SimResult},
    goal_model::GoalModel,
    ranking,
    rng::SeedBank,
    season::PreparedSeason,
    types::{Iteration, TeamIdx},
};

/// Per-team counts of finishing positions, flattened row-major
/// (team, position).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionHistogram {
    teams:      usize,
    iterations: u64,
    counts:     Vec<u64>,
}

impl PositionHistogram {
    pub fn new(teams: usize) -> Self {
        Self { teams, iterations: 0, counts: vec![0; teams * teams] }
    }

    pub fn team_count(&self) -> usize { self.teams }

    /// Number of finishing orders recorded so far.
    pub fn iterations(&self) -> u64 { self.iterations }

    /// Record one finishing order (best first). Every team must appear once.
    pub fn record(&mut self, order: &[TeamIdx]) {
        debug_assert_eq!(order.len(), self.teams);
        for (position, &team) in order.iter().enumerate() {
            self.counts[team * self.teams + position] += 1;
        }
        self.iterations += 1;
    }

    /// Counts for one team, position 1 first.
    pub fn row(&self, team: TeamIdx) -> &[u64] {
        &self.counts[team * self.teams..(team + 1) * self.teams]
    }

    /// How often `team` finished at zero-based `position`.
    pub fn count(&self, team: TeamIdx, position: usize) -> u64 {
        self.counts[team * self.teams + position]
    }

    /// Additive, order-independent merge.
    pub fn merge(mut self, other: PositionHistogram) -> PositionHistogram {
        debug_assert_eq!(self.teams, other.teams);
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts) {
            *mine += theirs;
        }
        self.iterations += other.iterations;
        self
    }
}

/// Runs many independent seasons over a fixed-size worker pool.
pub struct Aggregator<'a> {
    season: &'a PreparedSeason,
    model:  &'a dyn GoalModel,
    seeds:  SeedBank,
}

impl<'a> Aggregator<'a> {
    pub fn new(season: &'a PreparedSeason, model: &'a dyn GoalModel, seeds: SeedBank) -> Self {
        Self { season, model, seeds }
    }

    /// Simulate and rank a single season.
    pub fn run_iteration(&self, iteration: Iteration) -> SimResult<Vec<TeamIdx>> {
        let mut rng = self.seeds.for_iteration(iteration);
        let scenario = self
            .season
            .simulate(self.model, &mut rng)
            .map_err(|e| SimError::SimulationFailure { iteration, reason: e.to_string() })?;

        let order = ranking::rank(self.season, &scenario);
        if order.len() != self.season.team_count() {
            return Err(SimError::SimulationFailure {
                iteration,
                reason: format!(
                    "ranking returned {} teams, expected {}",
                    order.len(),
                    self.season.team_count()
                ),
            });
        }
        Ok(order)
    }

    /// Run `iterations` seasons on `workers` threads and return the
    /// combined histogram. Blocks until every iteration is accounted for.
    pub fn run(&self, iterations: u64, workers: usize) -> SimResult<PositionHistogram> {
        if iterations == 0 {
            return Err(SimError::invalid_argument("iterations", "must be at least 1"));
        }
        if workers == 0 {
            return Err(SimError::invalid_argument("workers", "must be at least 1"));
        }

        let teams = self.season.team_count();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("season-worker-{i}"))
            .build()?;

        let started = Instant::now();
        let histogram = pool.install(|| {
            (0..iterations)
                .into_par_iter()
                .try_fold(
                    || PositionHistogram::new(teams),
                    |mut partial, iteration| {
                        let order = self.run_iteration(iteration)?;
                        partial.record(&order);
                        Ok::<_, SimError>(partial)
                    },
                )
                .try_reduce(
                    || PositionHistogram::new(teams),
                    |a, b| Ok(a.merge(b)),
                )
        })?;

        log::debug!(
            "aggregated {} seasons on {workers} workers in {:.2?}",
            histogram.iterations(),
            started.elapsed()
        );
        Ok(histogram)
    }
}
