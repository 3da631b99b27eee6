//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through StreamRng instances derived
//! from the single master seed of the run.
//!
//! Each simulated season gets its own stream, seeded from
//! (master_seed XOR scrambled iteration index). This means:
//!   - Results do not depend on how iterations are spread over workers.
//!   - Any single season can be replayed in isolation.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

use crate::types::Iteration;

const STREAM_SCRAMBLE: u64 = 0x9e37_79b9_7f4a_7c15;

/// A deterministic RNG owned by exactly one simulated season.
pub struct StreamRng {
    pub iteration: Iteration,
    inner:         Pcg64Mcg,
}

impl StreamRng {
    /// Create the stream for `iteration` from the master seed.
    pub fn new(master_seed: u64, iteration: Iteration) -> Self {
        let derived_seed = master_seed ^ iteration.wrapping_mul(STREAM_SCRAMBLE);
        Self {
            iteration,
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a float in (0.0, 1.0). Safe to feed into `ln`.
    pub fn next_open_f64(&mut self) -> f64 {
        loop {
            let u = self.next_f64();
            if u > 0.0 {
                return u;
            }
        }
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }
}

/// Hands out one stream per iteration for a single run.
#[derive(Debug, Clone, Copy)]
pub struct SeedBank {
    master_seed: u64,
}

impl SeedBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_iteration(&self, iteration: Iteration) -> StreamRng {
        StreamRng::new(self.master_seed, iteration)
    }
}
