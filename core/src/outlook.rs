//! Reduction from position counts to probabilities.

use std::collections::HashMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::{
    aggregate::PositionHistogram,
    error::{SimError, SimResult},
};

/// Which final positions count as relegated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RelegationZone {
    /// The last `spots` positions.
    Bottom(usize),
    /// Every position after the first `spots`.
    BeyondTop(usize),
}

impl Default for RelegationZone {
    fn default() -> Self { Self::Bottom(3) }
}

impl RelegationZone {
    pub fn spots(&self) -> usize {
        match *self {
            Self::Bottom(spots) | Self::BeyondTop(spots) => spots,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bottom(_)    => "bottom",
            Self::BeyondTop(_) => "beyond_top",
        }
    }

    pub fn validate(&self, team_count: usize) -> SimResult<()> {
        if self.spots() > team_count {
            return Err(SimError::invalid_argument(
                "spots",
                format!("{} is outside [0, {team_count}]", self.spots()),
            ));
        }
        Ok(())
    }

    /// Zero-based positions inside the zone.
    pub fn positions(&self, team_count: usize) -> Range<usize> {
        match *self {
            Self::Bottom(spots)    => team_count.saturating_sub(spots)..team_count,
            Self::BeyondTop(spots) => spots.min(team_count)..team_count,
        }
    }
}

/// Final-position probabilities for one team.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamOutlook {
    pub name:       String,
    pub relegation: f64,
    /// Probability of each final position, 1st first.
    pub positions:  Vec<f64>,
}

impl TeamOutlook {
    /// Expected final position, 1-based.
    pub fn expected_position(&self) -> f64 {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, p)| (i + 1) as f64 * p)
            .sum()
    }
}

/// The result of a run: one outlook per team, in standings input order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Outlook {
    pub iterations: u64,
    pub zone:       RelegationZone,
    pub teams:      Vec<TeamOutlook>,
}

impl Outlook {
    /// probability = count / iterations, per team and position.
    pub fn reduce(
        histogram: &PositionHistogram,
        names: &[String],
        zone: RelegationZone,
    ) -> SimResult<Self> {
        let n = histogram.team_count();
        let iterations = histogram.iterations();
        if iterations == 0 {
            return Err(SimError::invalid_argument("iterations", "histogram is empty"));
        }
        if names.len() != n {
            return Err(SimError::invalid_argument(
                "names",
                format!("{} names for a {n}-team histogram", names.len()),
            ));
        }
        zone.validate(n)?;

        let zone_positions = zone.positions(n);
        let teams = names
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let positions: Vec<f64> = histogram
                    .row(idx)
                    .iter()
                    .map(|&c| c as f64 / iterations as f64)
                    .collect();
                let relegation = positions[zone_positions.clone()].iter().sum();
                TeamOutlook { name: name.clone(), relegation, positions }
            })
            .collect();

        Ok(Self { iterations, zone, teams })
    }

    pub fn get(&self, name: &str) -> Option<&TeamOutlook> {
        self.teams.iter().find(|t| t.name == name)
    }

    pub fn relegation_map(&self) -> HashMap<String, f64> {
        self.teams.iter().map(|t| (t.name.clone(), t.relegation)).collect()
    }

    pub fn position_map(&self) -> HashMap<String, Vec<f64>> {
        self.teams.iter().map(|t| (t.name.clone(), t.positions.clone())).collect()
    }

    /// Teams ordered by relegation probability, most at risk first.
    /// Equal probabilities keep input order.
    pub fn by_risk(&self) -> Vec<&TeamOutlook> {
        let mut sorted: Vec<&TeamOutlook> = self.teams.iter().collect();
        sorted.sort_by(|a, b| b.relegation.total_cmp(&a.relegation));
        sorted
    }
}
