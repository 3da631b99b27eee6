use std::fs;
use std::path::PathBuf;

use relegation_core::{League, RelegationZone, SimConfig, SimEngine};
use relegation_tools::{io, report};
use serde_json::Value;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).unwrap();
    path
}

fn small_outlook(dir: &TempDir) -> relegation_core::Outlook {
    let teams = write(
        dir,
        "teams.json",
        r#"{ "Zeta": { "points": 30, "gf": 40, "ga": 20 },
             "Alpha": { "points": 10, "gf": 15, "ga": 35 },
             "Mid": { "points": 20, "gf": 25, "ga": 25 } }"#,
    );
    let fixtures = write(
        dir,
        "fixtures.json",
        r#"[ { "home": "Zeta", "away": "Alpha", "expected": [2.0, 0.5] },
             { "home": "Mid", "away": "Zeta" } ]"#,
    );
    let config = SimConfig {
        iterations: 200,
        workers: 1,
        seed: 7,
        zone: RelegationZone::Bottom(1),
        ..SimConfig::default()
    };
    let league = League::new(
        io::load_teams(&teams).unwrap(),
        io::load_fixtures(&fixtures, config.default_expected).unwrap(),
    );
    SimEngine::new(&league, config).unwrap().run().unwrap()
}

#[test]
fn teams_keep_file_order() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "teams.json",
        r#"{ "Zeta": { "points": 3 }, "Alpha": { "points": 1, "gf": 2, "ga": 5 } }"#,
    );
    let teams = io::load_teams(&path).unwrap();
    let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Zeta", "Alpha"]);
    assert_eq!(teams[0].gf, 0);
    assert_eq!(teams[1].ga, 5);
}

#[test]
fn fixtures_without_rates_get_default() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "fixtures.json",
        r#"[ { "home": "A", "away": "B" }, { "home": "B", "away": "A", "expected": [0.4, 2.5] } ]"#,
    );
    let fixtures = io::load_fixtures(&path, (1.2, 1.0)).unwrap();
    assert_eq!(fixtures[0].expected, (1.2, 1.0));
    assert_eq!(fixtures[1].expected, (0.4, 2.5));
}

#[test]
fn played_and_history_parse() {
    let dir = TempDir::new().unwrap();
    let played = write(
        &dir,
        "played.json",
        r#"[ { "home": "A", "away": "B", "home_goals": 2, "away_goals": 1 } ]"#,
    );
    let history = write(
        &dir,
        "history.json",
        r#"{ "B": { "gf": 10, "ga": 20, "matches_played": 10 }, "A": { "gf": 5, "ga": 0 } }"#,
    );
    let played = io::load_played(&played).unwrap();
    assert_eq!(played.len(), 1);
    assert_eq!(played[0].home_goals, 2);

    let history = io::load_history(&history).unwrap();
    assert_eq!(history[0].0, "B");
    assert_eq!(history[1].1.matches_played, 1);
}

#[test]
fn missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let err = io::load_teams(&dir.path().join("nope.json")).unwrap_err();
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn csv_has_header_and_four_decimals() {
    let dir = TempDir::new().unwrap();
    let outlook = small_outlook(&dir);

    let mut buf = Vec::new();
    io::write_csv(&outlook, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let mut lines = text.lines();

    assert_eq!(lines.next(), Some("Team,Relegation,P1,P2,P3"));
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].starts_with("Zeta,"));
    for row in rows {
        for cell in row.split(',').skip(1) {
            let (_, decimals) = cell.split_once('.').unwrap();
            assert_eq!(decimals.len(), 4, "cell {cell}");
        }
    }
}

#[test]
fn json_output_keyed_by_team() {
    let dir = TempDir::new().unwrap();
    let outlook = small_outlook(&dir);
    let path = dir.path().join("out.json");
    io::save_output(&outlook, &path).unwrap();

    let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let map = value.as_object().unwrap();
    let keys: Vec<&String> = map.keys().collect();
    assert_eq!(keys, ["Zeta", "Alpha", "Mid"]);

    let alpha = &map["Alpha"];
    assert_eq!(alpha["positions"].as_array().unwrap().len(), 3);
    let relegation = alpha["relegation"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&relegation));
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let outlook = small_outlook(&dir);
    let err = io::save_output(&outlook, &dir.path().join("out.xlsx")).unwrap_err();
    assert_eq!(err.to_string(), "Unsupported format: .xlsx");
}

#[test]
fn convergence_table_one_row_per_count() {
    let dir = TempDir::new().unwrap();
    let outlook = small_outlook(&dir);
    let runs = vec![(100, outlook.clone()), (200, outlook)];

    let mut buf = Vec::new();
    io::write_convergence_csv(&runs, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "iterations,Zeta,Alpha,Mid");
    assert!(lines[1].starts_with("100,"));
    assert!(lines[2].starts_with("200,"));
}

#[test]
fn rates_written_as_pairs() {
    let dir = TempDir::new().unwrap();
    let history = write(&dir, "history.json", r#"{ "A": { "gf": 30, "ga": 15, "matches_played": 15 } }"#);
    let records = io::load_history(&history).unwrap();
    let rates = relegation_core::estimate::estimate_rates(
        records.iter().map(|(name, rec)| (name.as_str(), rec)),
    );

    let out = dir.path().join("rates.json");
    io::save_rates(&rates, &out).unwrap();
    let value: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["A"][0].as_f64(), Some(2.0));
    assert_eq!(value["A"][1].as_f64(), Some(1.0));
}

#[test]
fn report_lists_every_team() {
    let dir = TempDir::new().unwrap();
    let outlook = small_outlook(&dir);
    let summary = report::relegation_summary(&outlook);
    assert!(summary.starts_with("Relegation Probabilities:"));
    for name in ["Zeta", "Alpha", "Mid"] {
        assert!(summary.contains(&format!("{name}: ")));
    }
}
