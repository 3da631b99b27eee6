//! Goal-count models: one draw per side per fixture.
//!
//! RULE: A model holds no state between draws. All randomness
//! comes from the StreamRng passed in by the season simulator.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    error::{SimError, SimResult},
    rng::StreamRng,
    types::Goals,
};

/// Rates at or above this use transformed rejection instead of
/// the multiplication method (exp(-λ) loses precision quickly).
const PTRS_THRESHOLD: f64 = 10.0;

/// The contract every goal model must fulfill.
pub trait GoalModel: Send + Sync {
    /// Unique stable name, used in logs and the result store.
    fn name(&self) -> &'static str;

    /// Draw the goals scored by one side given its expected-goals rate.
    fn sample(&self, rate: f64, rng: &mut StreamRng) -> SimResult<Goals>;
}

/// Reject rates the models cannot sample from.
pub fn check_rate(rate: f64) -> SimResult<f64> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(SimError::InvalidRate { rate })
    }
}

// ── Poisson ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct PoissonGoals;

impl GoalModel for PoissonGoals {
    fn name(&self) -> &'static str { "poisson" }

    fn sample(&self, rate: f64, rng: &mut StreamRng) -> SimResult<Goals> {
        let rate = check_rate(rate)?;
        let k = if rate < PTRS_THRESHOLD {
            poisson_multiplication(rate, rng)
        } else {
            poisson_ptrs(rate, rng)
        };
        Ok(k.min(Goals::MAX as u64) as Goals)
    }
}

/// Knuth: multiply uniforms until the product drops below exp(-λ).
fn poisson_multiplication(rate: f64, rng: &mut StreamRng) -> u64 {
    let limit = (-rate).exp();
    let mut k = 0u64;
    let mut product = rng.next_f64();
    while product > limit {
        k += 1;
        product *= rng.next_f64();
    }
    k
}

/// Hörmann's transformed rejection with squeeze (PTRS).
fn poisson_ptrs(rate: f64, rng: &mut StreamRng) -> u64 {
    let slam = rate.sqrt();
    let loglam = rate.ln();
    let b = 0.931 + 2.53 * slam;
    let a = -0.059 + 0.02483 * b;
    let inv_alpha = 1.1239 + 1.1328 / (b - 3.4);
    let vr = 0.9277 - 3.6224 / (b - 2.0);

    loop {
        let u = rng.next_open_f64() - 0.5;
        let v = rng.next_f64();
        let us = 0.5 - u.abs();
        let k = ((2.0 * a / us + b) * u + rate + 0.43).floor();

        if us >= 0.07 && v <= vr {
            return k as u64;
        }
        if k < 0.0 || (us < 0.013 && v > us) {
            continue;
        }
        let lhs = v.ln() + inv_alpha.ln() - (a / (us * us) + b).ln();
        let rhs = -rate + k * loglam - ln_factorial(k as u64);
        if lhs <= rhs {
            return k as u64;
        }
    }
}

/// ln(k!), exact for small k and Stirling's series beyond.
fn ln_factorial(k: u64) -> f64 {
    if k < 10 {
        return (2..=k).map(|i| (i as f64).ln()).sum();
    }
    let n = k as f64;
    (n + 0.5) * n.ln() - n + 0.5 * (2.0 * std::f64::consts::PI).ln() + 1.0 / (12.0 * n)
        - 1.0 / (360.0 * n * n * n)
}

// ── Rounded expectation ─────────────────────────────────────────────

/// Deterministic model: every side scores its rate rounded to the
/// nearest integer. Useful for "expected result" runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundedGoals;

impl GoalModel for RoundedGoals {
    fn name(&self) -> &'static str { "rounded" }

    fn sample(&self, rate: f64, _rng: &mut StreamRng) -> SimResult<Goals> {
        let rate = check_rate(rate)?;
        Ok(rate.round().min(Goals::MAX as f64) as Goals)
    }
}

// ── Selection from configuration ────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalModelKind {
    #[default]
    Poisson,
    Rounded,
}

impl GoalModelKind {
    pub fn build(&self) -> Box<dyn GoalModel> {
        match self {
            Self::Poisson => Box::new(PoissonGoals),
            Self::Rounded => Box::new(RoundedGoals),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Poisson => "poisson",
            Self::Rounded => "rounded",
        }
    }
}

impl FromStr for GoalModelKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "poisson" => Ok(Self::Poisson),
            "rounded" => Ok(Self::Rounded),
            other => Err(SimError::invalid_argument(
                "goal_model",
                format!("unknown goal model '{other}' (expected poisson or rounded)"),
            )),
        }
    }
}
