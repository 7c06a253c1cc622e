use thiserror::Error;

use ft_core::{GeoError, GeofenceId};

#[derive(Debug, Error)]
pub enum GeofenceError {
    #[error(transparent)]
    Geo(#[from] GeoError),

    #[error("geofence {id}: radius must be a finite number of km greater than zero (got {radius_km})")]
    InvalidRadius { id: GeofenceId, radius_km: f64 },

    #[error("geofence CSV parse error at row {row}: {message}")]
    Parse { row: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GeofenceResult<T> = Result<T, GeofenceError>;
