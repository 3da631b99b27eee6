//! relegation-sim: Monte Carlo relegation and final-position estimates.
//!
//! Usage:
//!   relegation-sim --teams teams.json --fixtures fixtures.json \
//!       --spots 3 --iterations 20000 --workers 4 \
//!       [--granular] [--output probs.csv] [--db runs.db]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use relegation_core::{
    goal_model::GoalModelKind, store::ResultStore, League, RelegationZone, SimConfig, SimEngine,
};
use relegation_tools::{io, report};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ZoneArg {
    /// The last `spots` positions are relegated.
    Bottom,
    /// Every position after the first `spots` counts.
    BeyondTop,
}

#[derive(Parser, Debug)]
#[command(name = "relegation-sim")]
#[command(about = "Estimate relegation probabilities with detailed position distributions")]
struct Cli {
    /// Standings JSON
    #[arg(long)]
    teams: PathBuf,

    /// Remaining fixtures JSON
    #[arg(long)]
    fixtures: PathBuf,

    /// Already-played results JSON (head-to-head tie-breaks only)
    #[arg(long)]
    played: Option<PathBuf>,

    /// Run configuration JSON; flags below override it
    #[arg(long)]
    config: Option<String>,

    /// Number of relegation spots
    #[arg(long)]
    spots: Option<usize>,

    /// How `spots` is read
    #[arg(long, value_enum)]
    zone: Option<ZoneArg>,

    /// Simulated seasons
    #[arg(long)]
    iterations: Option<u64>,

    /// Worker threads
    #[arg(long, alias = "processes")]
    workers: Option<usize>,

    /// Master seed
    #[arg(long)]
    seed: Option<u64>,

    /// Goal model: poisson or rounded
    #[arg(long)]
    goal_model: Option<GoalModelKind>,

    /// Print full position distributions
    #[arg(long)]
    granular: bool,

    /// Save results to .csv or .json
    #[arg(long)]
    output: Option<PathBuf>,

    /// Record the run in a SQLite database
    #[arg(long)]
    db: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = resolve_config(&cli)?;
    let mut league = League::new(
        io::load_teams(&cli.teams)?,
        io::load_fixtures(&cli.fixtures, config.default_expected)?,
    );
    if let Some(path) = &cli.played {
        league = league.with_played(io::load_played(path)?);
    }

    let engine = SimEngine::new(&league, config)?;
    let outlook = engine.run()?;

    print!("{}", report::relegation_summary(&outlook));
    if cli.granular {
        println!();
        print!("{}", report::position_table(&outlook));
    }

    if let Some(path) = &cli.output {
        io::save_output(&outlook, path)?;
        println!("Saved to {}", path.display());
    }

    if let Some(db) = &cli.db {
        let mut store = ResultStore::open(db)?;
        store.migrate()?;
        let run_id = store.insert_run(engine.config(), engine.model_name(), env!("CARGO_PKG_VERSION"))?;
        store.save_outlook(&run_id, &outlook)?;
        log::info!("recorded run {run_id} in {db}");
    }

    Ok(())
}

/// File config (or defaults), then command-line overrides.
fn resolve_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    if let Some(iterations) = cli.iterations {
        config.iterations = iterations;
    }
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(model) = cli.goal_model {
        config.goal_model = model;
    }

    let spots = cli.spots.unwrap_or(config.zone.spots());
    config.zone = match (cli.zone, config.zone) {
        (Some(ZoneArg::Bottom), _) | (None, RelegationZone::Bottom(_)) => RelegationZone::Bottom(spots),
        (Some(ZoneArg::BeyondTop), _) | (None, RelegationZone::BeyondTop(_)) => {
            RelegationZone::BeyondTop(spots)
        }
    };
    Ok(config)
}
