use thiserror::Error;

use sv_core::Position;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("agent starting position {0:?} is out of bounds or on a wall")]
    BadPosition(Position),

    #[error("{what} count ({got}) does not match the required length ({expected})")]
    CountMismatch {
        expected: usize,
        got: usize,
        what: &'static str,
    },
}

pub type WorldResult<T> = Result<T, WorldError>;
