use thiserror::Error;

/// Construction-time contract violations. A running step never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlockError {
    #[error("arena must have positive, finite dimensions (got {width}x{height})")]
    InvalidArena { width: f32, height: f32 },

    #[error("at most {capacity} obstacles are supported")]
    TooManyObstacles { capacity: usize },
}
