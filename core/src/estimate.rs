//! Expected-goals rates from historical season totals.

use serde::{Deserialize, Serialize};

use crate::types::Goals;

/// Historical totals for one team.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoricalRecord {
    #[serde(default)]
    pub gf:             Goals,
    #[serde(default)]
    pub ga:             Goals,
    #[serde(default = "one_match")]
    pub matches_played: u32,
}

fn one_match() -> u32 { 1 }

/// Per-match scoring and conceding rates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RateEstimate {
    pub scored_per_match:   f64,
    pub conceded_per_match: f64,
}

pub fn estimate_rate(record: &HistoricalRecord) -> RateEstimate {
    let matches = record.matches_played.max(1) as f64;
    RateEstimate {
        scored_per_match:   record.gf as f64 / matches,
        conceded_per_match: record.ga as f64 / matches,
    }
}

/// Estimate rates for every team, keeping input order.
pub fn estimate_rates<'a, I>(history: I) -> Vec<(String, RateEstimate)>
where
    I: IntoIterator<Item = (&'a str, &'a HistoricalRecord)>,
{
    history
        .into_iter()
        .map(|(name, record)| (name.to_string(), estimate_rate(record)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates_are_per_match_averages() {
        let r = estimate_rate(&HistoricalRecord { gf: 30, ga: 15, matches_played: 20 });
        assert_eq!(r, RateEstimate { scored_per_match: 1.5, conceded_per_match: 0.75 });
    }

    #[test]
    fn zero_matches_does_not_divide_by_zero() {
        let r = estimate_rate(&HistoricalRecord { gf: 3, ga: 2, matches_played: 0 });
        assert_eq!(r.scored_per_match, 3.0);
    }

    #[test]
    fn missing_matches_played_defaults_to_one() {
        let rec: HistoricalRecord = serde_json::from_str(r#"{ "gf": 4, "ga": 1 }"#).unwrap();
        assert_eq!(rec.matches_played, 1);
    }

    #[test]
    fn estimate_rates_keeps_order() {
        let a = HistoricalRecord { gf: 10, ga: 10, matches_played: 10 };
        let b = HistoricalRecord { gf: 5, ga: 20, matches_played: 10 };
        let out = estimate_rates([("B", &b), ("A", &a)]);
        assert_eq!(out[0].0, "B");
        assert_eq!(out[1].1.conceded_per_match, 1.0);
    }
}
