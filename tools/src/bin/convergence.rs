//! convergence: relegation estimates across increasing iteration counts.
//!
//! Usage:
//!   convergence --teams teams.json --fixtures fixtures.json \
//!       --iterations 1000 5000 10000 20000 --output convergence.csv

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use relegation_core::{League, RelegationZone, SimConfig, SimEngine};
use relegation_tools::io;

#[derive(Parser, Debug)]
#[command(name = "convergence")]
#[command(about = "Benchmark Monte Carlo convergence of relegation estimates")]
struct Cli {
    #[arg(long)]
    teams: PathBuf,

    #[arg(long)]
    fixtures: PathBuf,

    #[arg(long, num_args = 1.., default_values_t = [1_000u64, 5_000, 10_000, 20_000])]
    iterations: Vec<u64>,

    #[arg(long, default_value_t = 3)]
    spots: usize,

    #[arg(long, alias = "processes", default_value_t = 1)]
    workers: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, default_value = "convergence.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let base = SimConfig {
        workers: cli.workers,
        seed: cli.seed,
        zone: RelegationZone::Bottom(cli.spots),
        ..SimConfig::default()
    };
    let league = League::new(
        io::load_teams(&cli.teams)?,
        io::load_fixtures(&cli.fixtures, base.default_expected)?,
    );

    let mut runs = Vec::with_capacity(cli.iterations.len());
    for &iterations in &cli.iterations {
        let config = SimConfig { iterations, ..base.clone() };
        let outlook = SimEngine::new(&league, config)?.run()?;
        log::info!("{iterations} iterations done");
        runs.push((iterations, outlook));
    }

    let file = File::create(&cli.output)
        .with_context(|| format!("Cannot create {}", cli.output.display()))?;
    io::write_convergence_csv(&runs, file)?;
    println!("Convergence data saved to {}", cli.output.display());
    Ok(())
}
