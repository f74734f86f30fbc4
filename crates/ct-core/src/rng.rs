//! Injectable sampling context.
//!
//! Every random draw the trip engine makes goes through a [`SamplingRng`]
//! that the caller constructs and passes in.  Two runs handed RNGs built from
//! the same seed make identical draws, provided they issue them in the same
//! order (the population sampler fixes that order).
//!
//! Runs that do not care about reproducibility use
//! [`SamplingRng::from_entropy`], which still records the seed it picked so
//! the run can be replayed later.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded generator plus the seed that produced it.
///
/// Used only in single-threaded contexts.  The type is deliberately not
/// `Clone`: two copies of the same stream would silently repeat draws.
pub struct SamplingRng {
    seed: u64,
    rng:  SmallRng,
}

impl SamplingRng {
    pub fn new(seed: u64) -> Self {
        Self { seed, rng: SmallRng::seed_from_u64(seed) }
    }

    /// Seed from the OS entropy source.  The chosen seed is available via
    /// [`seed`](Self::seed).
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    /// `new(seed)` when a seed is given, otherwise `from_entropy()`.
    pub fn seeded_or_entropy(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::new(s),
            None    => Self::from_entropy(),
        }
    }

    /// The seed this generator started from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Expose the inner `SmallRng` for use with `rand` / `rand_distr`
    /// distribution types (`Normal`, `WeightedIndex`, …).
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.rng.gen_range(range)
    }
}

impl std::fmt::Debug for SamplingRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SamplingRng").field("seed", &self.seed).finish_non_exhaustive()
    }
}
