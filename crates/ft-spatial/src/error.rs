//! Spatial-subsystem error type.

use thiserror::Error;

use ft_core::GeoError;

/// Errors produced by `ft-spatial`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpatialError {
    #[error(transparent)]
    Geo(#[from] GeoError),

    #[error("search radius must be a finite, non-negative number of km (got {0})")]
    InvalidRadius(f64),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
