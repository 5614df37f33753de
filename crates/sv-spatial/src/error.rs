use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("map dimensions must be non-zero, got {width}x{height}")]
    EmptyMap { width: u32, height: u32 },

    #[error("no path exists between the requested cells")]
    NoPath,
}

pub type SpatialResult<T> = Result<T, SpatialError>;
