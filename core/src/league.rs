//! League inputs: standings, remaining fixtures, played results.
//!
//! These are the immutable task descriptors handed to every worker.
//! Nothing in a simulation run mutates them.

use serde::{Deserialize, Serialize};

use crate::{
    error::{SimError, SimResult},
    types::{Goals, Points},
};

/// Expected-goals pair used when a fixture does not carry one.
pub const DEFAULT_EXPECTED: (f64, f64) = (1.2, 1.0);

pub const POINTS_WIN:  Points = 3;
pub const POINTS_DRAW: Points = 1;

/// Points earned by a side that scored `scored` and conceded `conceded`.
pub fn points_for(scored: Goals, conceded: Goals) -> Points {
    match scored.cmp(&conceded) {
        std::cmp::Ordering::Greater => POINTS_WIN,
        std::cmp::Ordering::Equal   => POINTS_DRAW,
        std::cmp::Ordering::Less    => 0,
    }
}

/// One row of the base standings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub name:   String,
    #[serde(default)]
    pub points: Points,
    #[serde(default)]
    pub gf:     Goals,
    #[serde(default)]
    pub ga:     Goals,
}

impl Team {
    pub fn new(name: impl Into<String>, points: Points, gf: Goals, ga: Goals) -> Self {
        Self { name: name.into(), points, gf, ga }
    }

    pub fn goal_diff(&self) -> i64 {
        self.gf as i64 - self.ga as i64
    }

    pub fn tally(&self) -> Tally {
        Tally { points: self.points, gf: self.gf, ga: self.ga }
    }
}

/// The mutable part of a team record. Copying a Tally is the deep copy
/// a scenario is built from: it has no link back to its source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub points: Points,
    pub gf:     Goals,
    pub ga:     Goals,
}

impl Tally {
    pub fn goal_diff(&self) -> i64 {
        self.gf as i64 - self.ga as i64
    }

    /// Add one match from this side's point of view. Returns the points earned.
    /// The tally is left untouched if any counter would overflow.
    pub fn record(&mut self, scored: Goals, conceded: Goals) -> SimResult<Points> {
        let earned = points_for(scored, conceded);
        let gf = self.gf.checked_add(scored).ok_or(SimError::CounterOverflow { counter: "goals for" })?;
        let ga = self.ga.checked_add(conceded).ok_or(SimError::CounterOverflow { counter: "goals against" })?;
        let points = self.points.checked_add(earned).ok_or(SimError::CounterOverflow { counter: "points" })?;
        *self = Tally { points, gf, ga };
        Ok(earned)
    }
}

/// A remaining fixture with its expected-goals pair (home, away).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fixture {
    pub home:     String,
    pub away:     String,
    pub expected: (f64, f64),
}

impl Fixture {
    pub fn new(home: impl Into<String>, away: impl Into<String>, expected: (f64, f64)) -> Self {
        Self { home: home.into(), away: away.into(), expected }
    }
}

/// An already-played match. Its goals are already in the base totals;
/// it only feeds head-to-head comparisons.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayedMatch {
    pub home:       String,
    pub away:       String,
    pub home_goals: Goals,
    pub away_goals: Goals,
}

impl PlayedMatch {
    pub fn new(
        home: impl Into<String>,
        away: impl Into<String>,
        home_goals: Goals,
        away_goals: Goals,
    ) -> Self {
        Self { home: home.into(), away: away.into(), home_goals, away_goals }
    }
}

/// Everything a run needs to know about the league.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct League {
    pub teams:    Vec<Team>,
    pub fixtures: Vec<Fixture>,
    #[serde(default)]
    pub played:   Vec<PlayedMatch>,
}

impl League {
    pub fn new(teams: Vec<Team>, fixtures: Vec<Fixture>) -> Self {
        Self { teams, fixtures, played: Vec::new() }
    }

    pub fn with_played(mut self, played: Vec<PlayedMatch>) -> Self {
        self.played = played;
        self
    }
}
