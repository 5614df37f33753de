//! World observer trait for progress reporting and data collection.
//!
//! Deliberately small: a caller driving `World::run` gets notified at tick
//! boundaries and at the end of a run, nothing more. There is no periodic
//! snapshot hook — a run's only recorded output is the single end-of-run
//! outcome report.

use sv_core::Tick;

use crate::world::Outcome;

/// Callbacks invoked by [`World::run`][crate::World::run] at tick
/// boundaries.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait WorldObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick, once `tick()` has returned.
    fn on_tick_end(&mut self, _tick: Tick, _finished: bool) {}

    /// Called once, after the run ends (either a win condition fired or the
    /// caller stopped calling `tick`).
    fn on_sim_end(&mut self, _final_tick: Tick, _outcome: Option<Outcome>) {}
}

/// A [`WorldObserver`] that does nothing.
pub struct NoopObserver;

impl WorldObserver for NoopObserver {}
