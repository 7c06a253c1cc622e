//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `GeoError` as one
//! variant via `#[from]`, so a rejected coordinate surfaces unchanged at
//! every layer.

use thiserror::Error;

/// Errors produced while validating geographic input and location reports.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("invalid coordinate ({lat}, {lon}): latitude must be in [-90, 90], longitude in [-180, 180]")]
    InvalidCoordinate { lat: f64, lon: f64 },

    /// A non-positional reading (speed, accuracy, heading) is out of range
    /// or not a finite number.
    #[error("invalid {field}: {value}")]
    InvalidMeasurement { field: &'static str, value: f64 },
}

/// Shorthand result type for coordinate validation.
pub type GeoResult<T> = Result<T, GeoError>;
