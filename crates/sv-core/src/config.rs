//! Top-level simulation configuration.
//!
//! The tick rate is a fixed constant ([`crate::time::TICK_RATE`]); the only
//! thing a caller configures is the PRNG seed.

/// Configuration threaded through `WorldBuilder`.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldConfig {
    /// Seed for the world's single [`crate::rng::SimRng`] stream.
    pub seed: u64,
}

impl WorldConfig {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl Default for WorldConfig {
    /// A fixed default seed so runs are reproducible unless the caller opts
    /// into a different one.
    fn default() -> Self {
        Self { seed: 0 }
    }
}
