//! Random site selection.
//!
//! The estimator never reaches for a process-wide generator: callers hand
//! it either a seed or anything implementing [`UniformSource`].
//!
//! # Reproducibility
//!
//! [`create_rng`] builds a `SmallRng` that is deterministic for a given
//! seed on the same platform. [`derive_seed`] splits one base seed into
//! independent per-trial seeds so that a seeded run draws the same sites
//! whether trials execute sequentially or in parallel.

use rand::Rng;

/// Creates a fast, seeded random number generator.
///
/// # Examples
/// ```
/// use percolation::random::{create_rng, UniformSource};
/// let mut a = create_rng(7);
/// let mut b = create_rng(7);
/// assert_eq!(a.uniform(100), b.uniform(100));
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// Draws a fresh base seed from the thread-local entropy source.
pub fn entropy_seed() -> u64 {
    rand::rng().random()
}

/// Mixes `index` into `base` with the SplitMix64 finalizer.
///
/// Consecutive indices map to well-separated seeds, so per-trial
/// generators built from them do not share early output.
///
/// Reference: Steele, Lea & Flood (2014), "Fast Splittable Pseudorandom
/// Number Generators", OOPSLA.
pub fn derive_seed(base: u64, index: u64) -> u64 {
    let mut z = base.wrapping_add(index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// A source of uniformly distributed integers.
pub trait UniformSource {
    /// Returns an integer drawn uniformly from `[0, bound)`.
    ///
    /// # Panics
    /// Implementations may panic when `bound == 0`.
    fn uniform(&mut self, bound: usize) -> usize;
}

impl<R: Rng> UniformSource for R {
    fn uniform(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(42);
        let mut rng2 = create_rng(42);
        let vals1: Vec<usize> = (0..10).map(|_| rng1.uniform(1000)).collect();
        let vals2: Vec<usize> = (0..10).map(|_| rng2.uniform(1000)).collect();
        assert_eq!(vals1, vals2);
    }

    #[test]
    fn test_uniform_single_value_range() {
        let mut rng = create_rng(3);
        for _ in 0..20 {
            assert_eq!(rng.uniform(1), 0);
        }
    }

    #[test]
    fn test_uniform_covers_range() {
        let mut rng = create_rng(11);
        let mut seen = [false; 6];
        for _ in 0..600 {
            seen[rng.uniform(6)] = true;
        }
        assert!(seen.iter().all(|&s| s), "every value in [0, 6) should appear");
    }

    #[test]
    fn test_derive_seed_distinct() {
        let seeds: Vec<u64> = (0..100).map(|i| derive_seed(42, i)).collect();
        let mut sorted = seeds.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), seeds.len());
    }

    #[test]
    fn test_derive_seed_stable() {
        assert_eq!(derive_seed(5, 9), derive_seed(5, 9));
        assert_ne!(derive_seed(5, 9), derive_seed(6, 9));
    }
}
