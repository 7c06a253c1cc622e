use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MovementError {
    #[error("movement threshold must be a finite, non-negative number of km (got {0})")]
    InvalidThreshold(f64),
}

pub type MovementResult<T> = Result<T, MovementError>;
