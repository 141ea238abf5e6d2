//! # Random Source
//!
//! Seedable pseudo-random generator shared by generation and anything else
//! that needs reproducible randomness.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded random stream. Two sources built from the same seed produce the
/// same sequence of draws.
#[derive(Debug, Clone)]
pub struct RandomSource {
    seed: u64,
    rng: StdRng,
}

impl RandomSource {
    /// Creates a source from a seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::RandomSource;
    ///
    /// let mut a = RandomSource::new(7);
    /// let mut b = RandomSource::new(7);
    /// assert_eq!(a.range_inclusive(0, 1000), b.range_inclusive(0, 1000));
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `[min, max]`. Returns `min` when the range is empty.
    pub fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Fair coin.
    pub fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    /// Picks one entry of `table` with probability proportional to its weight.
    ///
    /// Returns `None` for an empty table or one whose weights are all zero.
    pub fn weighted_choice<'a, T>(&mut self, table: &'a [(T, u32)]) -> Option<&'a T> {
        let index = WeightedIndex::new(table.iter().map(|(_, weight)| *weight)).ok()?;
        table.get(index.sample(&mut self.rng)).map(|(value, _)| value)
    }
}
