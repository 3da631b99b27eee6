//! estimate-rates: per-team goal rates from historical totals.
//!
//! Usage:
//!   estimate-rates --input history.json --output rates.json

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use relegation_core::estimate::estimate_rates;
use relegation_tools::io;

#[derive(Parser, Debug)]
#[command(name = "estimate-rates")]
#[command(about = "Estimate Poisson goal rates from historical totals")]
struct Cli {
    /// Historical totals JSON
    #[arg(long)]
    input: PathBuf,

    /// Where to write the rates JSON
    #[arg(long)]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let history = io::load_history(&cli.input)?;
    let rates = estimate_rates(history.iter().map(|(name, rec)| (name.as_str(), rec)));
    io::save_rates(&rates, &cli.output)?;

    println!("Rates for {} teams saved to {}", rates.len(), cli.output.display());
    Ok(())
}
