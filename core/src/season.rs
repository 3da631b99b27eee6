//! Season simulation: one scenario per iteration.
//!
//! PreparedSeason is built once per run: it validates the league and
//! resolves team names to indices. Every iteration then copies the base
//! tallies into a fresh Scenario and plays the remaining fixtures on it.
//!
//! RULE: A Scenario is owned by exactly one iteration and dropped once
//! its finishing order has been recorded.

use std::collections::HashMap;

use crate::{
    error::{SimError, SimResult},
    goal_model::{check_rate, GoalModel},
    league::{League, Tally},
    rng::StreamRng,
    types::{Goals, TeamIdx},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreparedFixture {
    pub home:     TeamIdx,
    pub away:     TeamIdx,
    pub expected: (f64, f64),
}

/// The score of one match, played or simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub home:       TeamIdx,
    pub away:       TeamIdx,
    pub home_goals: Goals,
    pub away_goals: Goals,
}

/// Apply one result to the two sides: goal tallies move by the score,
/// 3 points to the winner or 1 each on a draw.
pub fn apply_result(
    home: &mut Tally,
    away: &mut Tally,
    home_goals: Goals,
    away_goals: Goals,
) -> SimResult<()> {
    home.record(home_goals, away_goals)?;
    away.record(away_goals, home_goals)?;
    Ok(())
}

/// One fully simulated season.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub tallies: Vec<Tally>,
    pub results: Vec<MatchResult>,
}

/// Validated, index-resolved league. Read-only once built.
#[derive(Debug, Clone)]
pub struct PreparedSeason {
    names:    Vec<String>,
    base:     Vec<Tally>,
    fixtures: Vec<PreparedFixture>,
    played:   Vec<MatchResult>,
}

impl PreparedSeason {
    /// Check referential integrity and rates once, before any simulation.
    pub fn prepare(league: &League) -> SimResult<Self> {
        let mut index: HashMap<&str, TeamIdx> = HashMap::with_capacity(league.teams.len());
        for (i, team) in league.teams.iter().enumerate() {
            if index.insert(team.name.as_str(), i).is_some() {
                return Err(SimError::DuplicateTeam { team: team.name.clone() });
            }
        }

        let fixtures = league
            .fixtures
            .iter()
            .enumerate()
            .map(|(i, f)| -> SimResult<PreparedFixture> {
                let (home, away) = resolve_pair(&index, "fixture", i, &f.home, &f.away)?;
                check_rate(f.expected.0)?;
                check_rate(f.expected.1)?;
                Ok(PreparedFixture { home, away, expected: f.expected })
            })
            .collect::<SimResult<Vec<_>>>()?;

        let played = league
            .played
            .iter()
            .enumerate()
            .map(|(i, m)| -> SimResult<MatchResult> {
                let (home, away) = resolve_pair(&index, "played match", i, &m.home, &m.away)?;
                Ok(MatchResult { home, away, home_goals: m.home_goals, away_goals: m.away_goals })
            })
            .collect::<SimResult<Vec<_>>>()?;

        if fixtures.is_empty() {
            log::warn!("no remaining fixtures: every iteration will rank the base standings");
        }
        log::debug!(
            "prepared season: {} teams, {} fixtures, {} played results",
            league.teams.len(),
            fixtures.len(),
            played.len()
        );

        Ok(Self {
            names: league.teams.iter().map(|t| t.name.clone()).collect(),
            base: league.teams.iter().map(|t| t.tally()).collect(),
            fixtures,
            played,
        })
    }

    pub fn team_count(&self) -> usize { self.names.len() }

    pub fn names(&self) -> &[String] { &self.names }

    pub fn name(&self, idx: TeamIdx) -> &str { &self.names[idx] }

    pub fn base(&self) -> &[Tally] { &self.base }

    pub fn fixtures(&self) -> &[PreparedFixture] { &self.fixtures }

    pub fn played(&self) -> &[MatchResult] { &self.played }

    /// Play every remaining fixture, in list order, on a fresh copy of
    /// the base tallies. Home goals are drawn before away goals.
    pub fn simulate(&self, model: &dyn GoalModel, rng: &mut StreamRng) -> SimResult<Scenario> {
        let mut tallies = self.base.clone();
        let mut results = Vec::with_capacity(self.fixtures.len());

        for fixture in &self.fixtures {
            let home_goals = model.sample(fixture.expected.0, rng)?;
            let away_goals = model.sample(fixture.expected.1, rng)?;

            let (home, away) = pair_mut(&mut tallies, fixture.home, fixture.away);
            apply_result(home, away, home_goals, away_goals)?;

            results.push(MatchResult {
                home: fixture.home,
                away: fixture.away,
                home_goals,
                away_goals,
            });
        }

        Ok(Scenario { tallies, results })
    }
}

fn resolve_pair(
    index: &HashMap<&str, TeamIdx>,
    context: &'static str,
    i: usize,
    home: &str,
    away: &str,
) -> SimResult<(TeamIdx, TeamIdx)> {
    let lookup = |name: &str| {
        index.get(name).copied().ok_or_else(|| SimError::UnknownTeam {
            context,
            index: i,
            team: name.to_string(),
        })
    };
    let (h, a) = (lookup(home)?, lookup(away)?);
    if h == a {
        return Err(SimError::SelfFixture { context, index: i, team: home.to_string() });
    }
    Ok((h, a))
}

/// Two distinct mutable entries of one slice.
fn pair_mut(tallies: &mut [Tally], a: TeamIdx, b: TeamIdx) -> (&mut Tally, &mut Tally) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = tallies.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = tallies.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal_model::{PoissonGoals, RoundedGoals};
    use crate::league::{Fixture, PlayedMatch, Team};

    fn league() -> League {
        League::new(
            vec![Team::new("A", 10, 12, 8), Team::new("B", 9, 7, 7), Team::new("C", 4, 3, 11)],
            vec![
                Fixture::new("A", "B", (1.6, 0.4)),
                Fixture::new("C", "A", (0.6, 2.4)),
                Fixture::new("B", "C", (1.5, 1.4)),
            ],
        )
    }

    #[test]
    fn apply_result_awards_standard_points() {
        let mut h = Tally::default();
        let mut a = Tally::default();
        apply_result(&mut h, &mut a, 2, 1).unwrap();
        assert_eq!((h.points, a.points), (3, 0));
        apply_result(&mut h, &mut a, 0, 3).unwrap();
        assert_eq!((h.points, a.points), (3, 3));
        apply_result(&mut h, &mut a, 1, 1).unwrap();
        assert_eq!((h.points, a.points), (4, 4));
        assert_eq!((h.gf, h.ga, a.gf, a.ga), (3, 5, 5, 3));
    }

    #[test]
    fn unknown_team_is_a_configuration_error() {
        let mut l = league();
        l.fixtures.push(Fixture::new("A", "Ghost", (1.0, 1.0)));
        let err = PreparedSeason::prepare(&l).unwrap_err();
        assert!(err.is_configuration());
        assert!(matches!(err, SimError::UnknownTeam { index: 3, .. }));
    }

    #[test]
    fn unknown_team_in_played_results_is_rejected() {
        let l = league().with_played(vec![PlayedMatch::new("Ghost", "A", 1, 0)]);
        assert!(matches!(
            PreparedSeason::prepare(&l),
            Err(SimError::UnknownTeam { context: "played match", .. })
        ));
    }

    #[test]
    fn self_fixture_and_duplicates_are_rejected() {
        let mut l = league();
        l.fixtures.push(Fixture::new("B", "B", (1.0, 1.0)));
        assert!(matches!(PreparedSeason::prepare(&l), Err(SimError::SelfFixture { .. })));

        let mut l = league();
        l.teams.push(Team::new("A", 0, 0, 0));
        assert!(matches!(PreparedSeason::prepare(&l), Err(SimError::DuplicateTeam { .. })));
    }

    #[test]
    fn non_positive_rate_is_rejected_up_front() {
        let mut l = league();
        l.fixtures[1].expected = (0.0, 1.0);
        assert!(matches!(PreparedSeason::prepare(&l), Err(SimError::InvalidRate { .. })));
    }

    #[test]
    fn scenario_never_touches_the_base_standings() {
        let season = PreparedSeason::prepare(&league()).unwrap();
        let before = season.base().to_vec();
        let mut rng = StreamRng::new(1, 0);
        let scenario = season.simulate(&PoissonGoals, &mut rng).unwrap();
        assert_eq!(season.base(), before.as_slice());
        assert_eq!(scenario.results.len(), 3);
    }

    #[test]
    fn scenario_totals_match_recorded_results() {
        let season = PreparedSeason::prepare(&league()).unwrap();
        let mut rng = StreamRng::new(77, 4);
        let scenario = season.simulate(&PoissonGoals, &mut rng).unwrap();

        let awarded: u32 = scenario.tallies.iter().map(|t| t.points).sum::<u32>()
            - season.base().iter().map(|t| t.points).sum::<u32>();
        let expected: u32 = scenario
            .results
            .iter()
            .map(|r| if r.home_goals == r.away_goals { 2 } else { 3 })
            .sum();
        assert_eq!(awarded, expected);
    }

    #[test]
    fn rounded_model_gives_expected_table() {
        let season = PreparedSeason::prepare(&league()).unwrap();
        let mut rng = StreamRng::new(0, 0);
        let s = season.simulate(&RoundedGoals, &mut rng).unwrap();
        // A 2-0 B, C 1-2 A, B 2-1 C
        assert_eq!(s.tallies[0], Tally { points: 16, gf: 16, ga: 9 });
        assert_eq!(s.tallies[1], Tally { points: 12, gf: 9, ga: 10 });
        assert_eq!(s.tallies[2], Tally { points: 4, gf: 5, ga: 15 });
    }
}
