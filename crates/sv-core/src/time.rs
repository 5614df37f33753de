//! Simulation time model.
//!
//! Time is an integer tick counter. `World` advances it by exactly one per
//! call to `tick()`; all duration-based logic (sprint cooldowns, tower
//! transitions, the target-dwell win condition) is expressed in ticks
//! converted from seconds via [`TIME_PER_TICK`], never in wall-clock time.

use std::fmt;

/// Ticks per simulated second.
pub const TICK_RATE: u32 = 20;

/// Simulated seconds represented by one tick.
pub const TIME_PER_TICK: f32 = 1.0 / TICK_RATE as f32;

/// Convert a duration in seconds to a whole number of ticks, rounding up so
/// a timer armed for `secs` seconds never fires early.
#[inline]
pub fn ticks_for_secs(secs: f32) -> u64 {
    (secs / TIME_PER_TICK).ceil() as u64
}

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Simulated seconds elapsed since tick 0.
    #[inline]
    pub fn as_secs(self) -> f32 {
        self.0 as f32 * TIME_PER_TICK
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::AddAssign<u64> for Tick {
    #[inline]
    fn add_assign(&mut self, rhs: u64) {
        self.0 += rhs;
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
