use ft_core::{AssetId, GeoError, GeofenceId};
use ft_geofence::GeofenceError;
use ft_movement::MovementError;
use ft_spatial::SpatialError;
use ft_store::StoreError;
use thiserror::Error;

/// Everything a tracker operation can fail with.
///
/// The first four variants are caller-input errors an adapter should map
/// to its own "bad request" / "not found" responses.  None are retried.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error(transparent)]
    InvalidCoordinate(GeoError),

    #[error("invalid {field}: {value}")]
    InvalidMeasurement { field: &'static str, value: f64 },

    #[error("asset {0} not found")]
    AssetNotFound(AssetId),

    #[error("geofence {0} not found")]
    GeofenceNotFound(GeofenceId),

    #[error("invalid geofence: {0}")]
    InvalidGeofence(#[from] GeofenceError),

    #[error("invalid proximity query: {0}")]
    InvalidQuery(#[from] SpatialError),

    #[error("invalid movement parameters: {0}")]
    Movement(#[from] MovementError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<GeoError> for TrackError {
    fn from(e: GeoError) -> Self {
        match e {
            GeoError::InvalidMeasurement { field, value } => TrackError::InvalidMeasurement { field, value },
            other => TrackError::InvalidCoordinate(other),
        }
    }
}

pub type TrackResult<T> = Result<T, TrackError>;
