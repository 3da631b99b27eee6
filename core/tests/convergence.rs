//! Increasing the iteration count must not shift estimates beyond
//! sampling noise.

use relegation_core::{
    engine::SimEngine,
    league::{Fixture, League, Team},
    RelegationZone, SimConfig,
};

fn league() -> League {
    League::new(
        vec![
            Team::new("Alto", 30, 30, 20),
            Team::new("Medio", 27, 25, 22),
            Team::new("Bajo", 25, 20, 24),
            Team::new("Fondo", 24, 18, 27),
            Team::new("Sotano", 23, 17, 27),
        ],
        vec![
            Fixture::new("Alto", "Sotano", (1.7, 0.9)),
            Fixture::new("Medio", "Fondo", (1.4, 1.0)),
            Fixture::new("Bajo", "Alto", (1.0, 1.3)),
            Fixture::new("Fondo", "Sotano", (1.2, 1.1)),
            Fixture::new("Sotano", "Bajo", (1.1, 1.2)),
            Fixture::new("Fondo", "Medio", (1.0, 1.2)),
        ],
    )
}

fn relegation(iterations: u64, seed: u64) -> Vec<f64> {
    let config = SimConfig {
        iterations,
        workers: 4,
        seed,
        zone: RelegationZone::Bottom(2),
        ..SimConfig::default_test()
    };
    SimEngine::new(&league(), config)
        .unwrap()
        .run()
        .unwrap()
        .teams
        .iter()
        .map(|t| t.relegation)
        .collect()
}

#[test]
fn estimates_agree_within_sampling_noise() {
    let small = relegation(1_000, 11);
    let large = relegation(50_000, 12);

    for (p_small, p_large) in small.iter().zip(&large) {
        // Standard error is dominated by the small run.
        let se = (p_large * (1.0 - p_large) / 1_000.0).sqrt();
        let tolerance = 4.0 * se + 0.01;
        assert!(
            (p_small - p_large).abs() <= tolerance,
            "Estimate moved from {p_small:.4} to {p_large:.4} (tolerance {tolerance:.4})"
        );
    }
}
