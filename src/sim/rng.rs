//! Injectable random source
//!
//! Row generation only ever asks for uniform values in [0, 1) and uniform
//! indices, so the session depends on this narrow trait instead of a concrete
//! generator. Tests plug in scripted sources; gameplay uses a seeded PCG32.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Source of uniform random draws
pub trait RandomSource {
    /// Uniform value in [0, 1)
    fn next_unit(&mut self) -> f64;

    /// Uniform index in [0, len). `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        let idx = (self.next_unit() * len as f64) as usize;
        idx.min(len.saturating_sub(1))
    }
}

impl RandomSource for Pcg32 {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.random_range(0..len.max(1))
    }
}

/// Build the default generator for a run seed
pub fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        seeded_rng(self.seed)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::RandomSource;

    /// Always returns the same value
    pub struct ConstantSource(pub f64);

    impl RandomSource for ConstantSource {
        fn next_unit(&mut self) -> f64 {
            self.0
        }
    }

    /// Replays a script of unit draws, then repeats the last one
    pub struct ScriptedSource {
        draws: Vec<f64>,
        pos: usize,
    }

    impl ScriptedSource {
        pub fn new(draws: &[f64]) -> Self {
            Self {
                draws: draws.to_vec(),
                pos: 0,
            }
        }
    }

    impl RandomSource for ScriptedSource {
        fn next_unit(&mut self) -> f64 {
            let value = self
                .draws
                .get(self.pos)
                .or(self.draws.last())
                .copied()
                .unwrap_or(0.0);
            self.pos += 1;
            value
        }
    }
}
