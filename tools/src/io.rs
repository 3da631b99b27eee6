//! JSON/CSV input and output.
//!
//! Input shapes:
//!   teams.json     { "Team": { "points": 0, "gf": 0, "ga": 0 }, ... }
//!   fixtures.json  [ { "home": "A", "away": "B", "expected": [1.2, 1.0] }, ... ]
//!   played.json    [ { "home": "A", "away": "B", "home_goals": 1, "away_goals": 0 }, ... ]
//!   history.json   { "Team": { "gf": 30, "ga": 20, "matches_played": 19 }, ... }
//!
//! Object key order is kept, so the team order of teams.json is the
//! order used in every output.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use relegation_core::{
    estimate::{HistoricalRecord, RateEstimate},
    league::{Fixture, PlayedMatch, Team},
    types::{Goals, Points},
    Outlook,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
struct TeamRecord {
    #[serde(default)]
    points: Points,
    #[serde(default)]
    gf:     Goals,
    #[serde(default)]
    ga:     Goals,
}

#[derive(Debug, Deserialize)]
struct FixtureRecord {
    home:     String,
    away:     String,
    #[serde(default)]
    expected: Option<(f64, f64)>,
}

#[derive(Debug, Serialize)]
struct OutlookRecord<'a> {
    relegation: f64,
    positions:  &'a [f64],
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Cannot parse {}", path.display()))
}

/// Parse a name-keyed JSON object, keeping key order.
fn read_keyed<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<(String, T)>> {
    let raw: Map<String, Value> = read_json(path)?;
    raw.into_iter()
        .map(|(name, value)| -> Result<(String, T)> {
            let record = serde_json::from_value(value)
                .with_context(|| format!("Invalid entry '{name}' in {}", path.display()))?;
            Ok((name, record))
        })
        .collect()
}

pub fn load_teams(path: &Path) -> Result<Vec<Team>> {
    let records: Vec<(String, TeamRecord)> = read_keyed(path)?;
    Ok(records
        .into_iter()
        .map(|(name, r)| Team::new(name, r.points, r.gf, r.ga))
        .collect())
}

/// Fixtures without an `expected` pair get `default_expected`.
pub fn load_fixtures(path: &Path, default_expected: (f64, f64)) -> Result<Vec<Fixture>> {
    let records: Vec<FixtureRecord> = read_json(path)?;
    Ok(records
        .into_iter()
        .map(|r| Fixture::new(r.home, r.away, r.expected.unwrap_or(default_expected)))
        .collect())
}

pub fn load_played(path: &Path) -> Result<Vec<PlayedMatch>> {
    read_json(path)
}

pub fn load_history(path: &Path) -> Result<Vec<(String, HistoricalRecord)>> {
    read_keyed(path)
}

// ── Output ─────────────────────────────────────────────────────────

/// CSV: Team,Relegation,P1..Pn with four decimals.
pub fn write_csv<W: Write>(outlook: &Outlook, writer: W) -> Result<()> {
    let positions = outlook.teams.first().map_or(0, |t| t.positions.len());
    let mut out = csv::Writer::from_writer(writer);

    let mut header = vec!["Team".to_string(), "Relegation".to_string()];
    header.extend((1..=positions).map(|p| format!("P{p}")));
    out.write_record(&header)?;

    for team in &outlook.teams {
        let mut row = vec![team.name.clone(), format!("{:.4}", team.relegation)];
        row.extend(team.positions.iter().map(|p| format!("{p:.4}")));
        out.write_record(&row)?;
    }
    out.flush()?;
    Ok(())
}

/// JSON: { team: { "relegation": p, "positions": [...] } }.
pub fn outlook_json(outlook: &Outlook) -> Result<Value> {
    let mut map = Map::new();
    for team in &outlook.teams {
        let record = OutlookRecord { relegation: team.relegation, positions: &team.positions };
        map.insert(team.name.clone(), serde_json::to_value(record)?);
    }
    Ok(Value::Object(map))
}

/// Save by extension: `.csv` or `.json`.
pub fn save_output(outlook: &Outlook, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => {
            let file = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
            write_csv(outlook, file)
        }
        "json" => {
            let file = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
            serde_json::to_writer_pretty(file, &outlook_json(outlook)?)?;
            Ok(())
        }
        other => bail!("Unsupported format: .{other}"),
    }
}

/// Convergence table: one row per iteration count, one column per team.
pub fn write_convergence_csv<W: Write>(runs: &[(u64, Outlook)], writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    let Some((_, first)) = runs.first() else {
        out.flush()?;
        return Ok(());
    };

    let mut header = vec!["iterations".to_string()];
    header.extend(first.teams.iter().map(|t| t.name.clone()));
    out.write_record(&header)?;

    for (iterations, outlook) in runs {
        let mut row = vec![iterations.to_string()];
        row.extend(outlook.teams.iter().map(|t| t.relegation.to_string()));
        out.write_record(&row)?;
    }
    out.flush()?;
    Ok(())
}

/// Rates as { team: [scored_per_match, conceded_per_match] }.
pub fn save_rates(rates: &[(String, RateEstimate)], path: &Path) -> Result<()> {
    let mut map = Map::new();
    for (name, rate) in rates {
        map.insert(
            name.clone(),
            serde_json::to_value((rate.scored_per_match, rate.conceded_per_match))?,
        );
    }
    let file = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
    serde_json::to_writer_pretty(file, &Value::Object(map))?;
    Ok(())
}
