//! Seeded random streams for reproducible simulation.
//!
//! [`SimRng`] wraps a seeded PRNG and derives an independent stream per
//! simulation path from a master seed. Because every path owns its stream,
//! the draws a path sees do not depend on how paths are grouped into
//! batches or scheduled across threads — batch size becomes a pure memory
//! knob with no effect on the sampled values.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

/// SplitMix64 finaliser (Steele, Lea & Flood). Used to turn a master seed
/// and a path index into a well-mixed per-path seed.
#[inline]
pub(crate) fn split_mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Simulation random number generator.
///
/// Seeded, reproducible stream of standard-normal variates. The same seed
/// always produces the same sequence.
///
/// # Examples
///
/// ```rust
/// use sim_engine::rng::SimRng;
///
/// let mut a = SimRng::from_seed(42);
/// let mut b = SimRng::from_seed(42);
/// assert_eq!(a.gen_normal(), b.gen_normal());
/// ```
pub struct SimRng {
    inner: StdRng,
    seed: u64,
}

impl SimRng {
    /// Creates a generator initialised with the given seed.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Derives the independent stream for one simulation path.
    ///
    /// The per-path seed mixes the master seed with the path index through
    /// SplitMix64, so neighbouring paths get statistically unrelated
    /// streams and the mapping is stable across batch layouts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sim_engine::rng::SimRng;
    ///
    /// let mut first = SimRng::for_path(42, 0);
    /// let mut again = SimRng::for_path(42, 0);
    /// assert_eq!(first.gen_normal(), again.gen_normal());
    /// ```
    #[inline]
    pub fn for_path(master_seed: u64, path_idx: u64) -> Self {
        let mixed = split_mix64(master_seed ^ split_mix64(path_idx));
        Self::from_seed(mixed)
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates one standard normal variate (mean 0, std 1).
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Samples from an arbitrary `rand_distr` distribution.
    #[inline]
    pub fn sample<D: Distribution<f64>>(&mut self, distribution: &D) -> f64 {
        distribution.sample(&mut self.inner)
    }

    /// Fills the buffer with standard normal variates without allocating.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }
}
