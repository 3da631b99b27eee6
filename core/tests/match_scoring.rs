//! Every simulated match hands out 2 or 3 points, never anything else.

use relegation_core::{
    goal_model::PoissonGoals,
    league::{Fixture, League, Team},
    rng::SeedBank,
    season::PreparedSeason,
};

#[test]
fn every_match_awards_two_or_three_points() {
    let teams: Vec<Team> = (0..6).map(|i| Team::new(format!("T{i}"), 0, 0, 0)).collect();
    let mut fixtures = Vec::new();
    for h in 0..6 {
        for a in 0..6 {
            if h != a {
                fixtures.push(Fixture::new(format!("T{h}"), format!("T{a}"), (1.4, 1.1)));
            }
        }
    }
    let season = PreparedSeason::prepare(&League::new(teams, fixtures)).unwrap();
    let bank = SeedBank::new(31337);

    for iteration in 0..200 {
        let mut rng = bank.for_iteration(iteration);
        let scenario = season.simulate(&PoissonGoals, &mut rng).unwrap();

        let mut expected_total = 0;
        for r in &scenario.results {
            let awarded = if r.home_goals == r.away_goals { 2 } else { 3 };
            assert!(awarded == 2 || awarded == 3);
            expected_total += awarded;
        }
        let total: u32 = scenario.tallies.iter().map(|t| t.points).sum();
        assert_eq!(total, expected_total, "Points leaked in iteration {iteration}");

        let gf: u32 = scenario.tallies.iter().map(|t| t.gf).sum();
        let ga: u32 = scenario.tallies.iter().map(|t| t.ga).sum();
        assert_eq!(gf, ga, "Goals for and against must balance");
    }
}
