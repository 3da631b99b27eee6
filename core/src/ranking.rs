//! Final-table ranking with head-to-head tie-breaks.
//!
//! ORDER OF CRITERIA (applied within each group of teams level on points):
//!   1. head-to-head points          (matches among the tied teams only)
//!   2. head-to-head goal difference
//!   3. head-to-head goals for
//!   4. overall goal difference
//!   5. overall goals for
//!   6. team name, ascending         (keeps the order total and stable)
//!
//! The head-to-head sub-table is built per tied group and dropped as soon
//! as the group is ordered.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::{
    league::{points_for, Tally, Team},
    season::{MatchResult, PreparedSeason, Scenario},
    types::{Goals, Points, TeamIdx},
};

/// A team's record restricted to matches against a subset of opponents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadToHead {
    pub points: Points,
    pub gf:     Goals,
    pub ga:     Goals,
}

impl HeadToHead {
    pub fn goal_diff(&self) -> i64 {
        self.gf as i64 - self.ga as i64
    }

    /// Saturates instead of wrapping so comparisons stay ordered.
    fn add(&mut self, other: &HeadToHead) {
        self.points = self.points.saturating_add(other.points);
        self.gf = self.gf.saturating_add(other.gf);
        self.ga = self.ga.saturating_add(other.ga);
    }
}

/// Explicit head-to-head records: team -> opponent -> record.
pub type HeadToHeadTable = HashMap<String, HashMap<String, HeadToHead>>;

/// Order a simulated season best to worst. Head-to-head comparisons use the
/// season's played results plus every result simulated in the scenario.
pub fn rank(season: &PreparedSeason, scenario: &Scenario) -> Vec<TeamIdx> {
    let results: Vec<&MatchResult> = season.played().iter().chain(&scenario.results).collect();
    order_table(&scenario.tallies, season.names(), |group| {
        sub_table_from_results(group, &results, scenario.tallies.len())
    })
}

/// Same as `rank`, resolved to team names.
pub fn rank_names(season: &PreparedSeason, scenario: &Scenario) -> Vec<String> {
    rank(season, scenario)
        .into_iter()
        .map(|idx| season.name(idx).to_string())
        .collect()
}

/// Order a standings table against an explicit head-to-head record.
/// Opponents missing from `h2h` count as no matches played.
pub fn rank_with_head_to_head(teams: &[Team], h2h: &HeadToHeadTable) -> Vec<String> {
    let tallies: Vec<Tally> = teams.iter().map(Team::tally).collect();
    let names: Vec<String> = teams.iter().map(|t| t.name.clone()).collect();

    let order = order_table(&tallies, &names, |group| {
        group
            .iter()
            .map(|&me| {
                let mut total = HeadToHead::default();
                if let Some(row) = h2h.get(&names[me]) {
                    for &opp in group.iter().filter(|&&opp| opp != me) {
                        if let Some(record) = row.get(&names[opp]) {
                            total.add(record);
                        }
                    }
                }
                total
            })
            .collect()
    });

    order.into_iter().map(|idx| names[idx].clone()).collect()
}

/// Sort by points, then reorder every tied group with the criteria above.
/// `sub_table` returns one head-to-head record per group member, aligned
/// with the group slice it is given.
fn order_table<F>(tallies: &[Tally], names: &[String], mut sub_table: F) -> Vec<TeamIdx>
where
    F: FnMut(&[TeamIdx]) -> Vec<HeadToHead>,
{
    let mut order: Vec<TeamIdx> = (0..tallies.len()).collect();
    order.sort_by(|&a, &b| tallies[b].points.cmp(&tallies[a].points));

    let mut start = 0;
    while start < order.len() {
        let points = tallies[order[start]].points;
        let len = order[start..]
            .iter()
            .take_while(|&&idx| tallies[idx].points == points)
            .count();
        let end = start + len;

        if len > 1 {
            let group = &mut order[start..end];
            let table = sub_table(group);
            let mut keyed: Vec<(TeamIdx, HeadToHead)> = group.iter().copied().zip(table).collect();
            keyed.sort_by(|(a, ha), (b, hb)| compare_tied(*a, ha, *b, hb, tallies, names));
            for (slot, (idx, _)) in group.iter_mut().zip(keyed) {
                *slot = idx;
            }
        }
        start = end;
    }
    order
}

fn compare_tied(
    a: TeamIdx,
    ha: &HeadToHead,
    b: TeamIdx,
    hb: &HeadToHead,
    tallies: &[Tally],
    names: &[String],
) -> Ordering {
    let (ta, tb) = (&tallies[a], &tallies[b]);
    hb.points
        .cmp(&ha.points)
        .then_with(|| hb.goal_diff().cmp(&ha.goal_diff()))
        .then_with(|| hb.gf.cmp(&ha.gf))
        .then_with(|| tb.goal_diff().cmp(&ta.goal_diff()))
        .then_with(|| tb.gf.cmp(&ta.gf))
        .then_with(|| names[a].cmp(&names[b]))
}

/// Build the head-to-head sub-table for `group` from match results.
fn sub_table_from_results(
    group: &[TeamIdx],
    results: &[&MatchResult],
    team_count: usize,
) -> Vec<HeadToHead> {
    let mut slot: Vec<Option<usize>> = vec![None; team_count];
    for (pos, &idx) in group.iter().enumerate() {
        slot[idx] = Some(pos);
    }

    let mut table = vec![HeadToHead::default(); group.len()];
    for r in results {
        let (Some(h), Some(a)) = (slot[r.home], slot[r.away]) else {
            continue;
        };
        table[h].add(&HeadToHead {
            points: points_for(r.home_goals, r.away_goals),
            gf:     r.home_goals,
            ga:     r.away_goals,
        });
        table[a].add(&HeadToHead {
            points: points_for(r.away_goals, r.home_goals),
            gf:     r.away_goals,
            ga:     r.home_goals,
        });
    }
    table
}
