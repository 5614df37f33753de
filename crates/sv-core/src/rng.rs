//! The simulation's single deterministic PRNG stream.
//!
//! Spec: "given the same initial state, agent strategies, and pseudo-random
//! seed, `tick()` sequences must be reproducible. All randomness ... draws
//! from a single well-defined PRNG stream." `World` owns exactly one
//! `SimRng` and threads it through ambient-noise emission, self-noise
//! emission, and perceived-angle sampling, consumed strictly in tick order —
//! there is no per-agent RNG to decorrelate, since the tick loop is
//! single-threaded and sequential.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// The world's single deterministic RNG.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand`/`rand_distr`
    /// distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
