//! Terminal summaries of an Outlook.

use std::fmt::Write as _;

use relegation_core::Outlook;

/// "Team: 12.34%" lines, most at risk first.
pub fn relegation_summary(outlook: &Outlook) -> String {
    let mut out = String::from("Relegation Probabilities:\n");
    for team in outlook.by_risk() {
        let _ = writeln!(out, "{}: {:.2}%", team.name, team.relegation * 100.0);
    }
    out
}

/// Full position table plus expected finishing position, most at risk first.
pub fn position_table(outlook: &Outlook) -> String {
    let positions = outlook.teams.first().map_or(0, |t| t.positions.len());
    let mut out = String::from("Position Distributions:\n");

    let header: Vec<String> = std::iter::once("Team".to_string())
        .chain((1..=positions).map(|p| p.to_string()))
        .chain(std::iter::once("Exp".to_string()))
        .collect();
    let _ = writeln!(out, "{}", header.join(" | "));

    for team in outlook.by_risk() {
        let cells: Vec<String> = team
            .positions
            .iter()
            .map(|p| format!("{:.1}%", p * 100.0))
            .collect();
        let _ = writeln!(
            out,
            "{} | {} | {:.2}",
            team.name,
            cells.join(" | "),
            team.expected_position()
        );
    }
    out
}
