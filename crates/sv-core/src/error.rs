//! The simulation's error taxonomy.
//!
//! Per the propagation policy: world-internal invariant violations (bounds,
//! wall interpenetration, ID uniqueness) are resolved locally — clipped,
//! pushed out, or ignored — and never surface as `Err`. Only caller-facing
//! misuse crosses the boundary as a `Result`. Some variants here are never
//! returned as `Err` at all; they exist so call sites have a single typed
//! value to hand to `tracing` when logging a rejected action (e.g.
//! `SelfMessage`, `DuplicateTowerEntry`).

use thiserror::Error;

use crate::position::Position;

/// The top-level error type for the `sv-*` crates.
#[derive(Debug, Error)]
pub enum SvError {
    /// `Agent::on_pick_start` returned a position that is out of bounds or on
    /// a wall tile. Fatal for that run's `World::setup`.
    #[error("agent starting position {0:?} is out of bounds or on a wall")]
    BadPosition(Position),

    /// `set_movement_speed` was called with a value outside `[0, 3]`.
    #[error("movement speed {0} is out of bounds (expected 0..=3)")]
    BadSpeed(f32),

    /// A path request found no route between two cells. Non-fatal: the
    /// pathfinder surfaces this as `None` rather than an `Err`; the variant
    /// exists for callers that want to log a failed request uniformly.
    #[error("no path exists between the requested cells")]
    NoPath,

    /// `send_message` targeted the sender itself. Dropped silently with a
    /// `tracing::warn!`; never returned as `Err`.
    #[error("agent tried to send a message to itself")]
    SelfMessage,

    /// `enter_tower`/`leave_tower` called while already in or transitioning
    /// to a tower. Returns `false` from the agent API; never returned as
    /// `Err`.
    #[error("duplicate tower entry/exit while already interacting with a tower")]
    DuplicateTowerEntry,

    /// A save file failed to parse or did not match the expected schema.
    #[error("save file error: {0}")]
    SaveFile(String),

    /// Wraps an I/O failure (reading/writing a save file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `sv-*` crates.
pub type SvResult<T> = Result<T, SvError>;
