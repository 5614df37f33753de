//! `sv-agent`'s error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("movement speed {0} is out of bounds (expected 0..=3)")]
    BadSpeed(f32),
    #[error("agent's on_pick_start returned an out-of-bounds or walled position")]
    BadPosition,
    #[error("tried to enter/leave a tower while already interacting with one")]
    DuplicateTowerEntry,
}

pub type AgentResult<T> = Result<T, AgentError>;
