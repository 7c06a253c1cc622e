//! Location reports (input) and recorded samples (history).

use chrono::{DateTime, Utc};

use crate::{AssetId, GeoError, GeoPoint, GeoResult};

/// Default positional accuracy assumed when a report does not carry one.
pub const DEFAULT_ACCURACY_M: f64 = 10.0;

// ── LocationSource ────────────────────────────────────────────────────────────

/// How a position fix was obtained.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LocationSource {
    #[default]
    Gps,
    Cell,
    Wifi,
    Manual,
}

impl LocationSource {
    pub fn as_str(self) -> &'static str {
        match self {
            LocationSource::Gps    => "gps",
            LocationSource::Cell   => "cell",
            LocationSource::Wifi   => "wifi",
            LocationSource::Manual => "manual",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "gps"    => Some(LocationSource::Gps),
            "cell"   => Some(LocationSource::Cell),
            "wifi"   => Some(LocationSource::Wifi),
            "manual" => Some(LocationSource::Manual),
            _        => None,
        }
    }
}

impl std::fmt::Display for LocationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── LocationReport ────────────────────────────────────────────────────────────

/// One incoming position report, before validation.
///
/// `heading_deg` is `None` when the sender did not measure a heading; the
/// tracker then derives one from the previous position.  `Some(0.0)` is a
/// genuine due-north heading and is kept as-is.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationReport {
    pub lat:         f64,
    pub lon:         f64,
    pub speed_kmh:   f64,
    pub heading_deg: Option<f64>,
    pub accuracy_m:  f64,
    pub source:      LocationSource,
}

impl LocationReport {
    /// A stationary GPS report at `(lat, lon)` with default accuracy.
    pub fn at(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            speed_kmh:   0.0,
            heading_deg: None,
            accuracy_m:  DEFAULT_ACCURACY_M,
            source:      LocationSource::Gps,
        }
    }

    pub fn speed(mut self, kmh: f64) -> Self {
        self.speed_kmh = kmh;
        self
    }

    pub fn heading(mut self, deg: f64) -> Self {
        self.heading_deg = Some(deg);
        self
    }

    pub fn accuracy(mut self, meters: f64) -> Self {
        self.accuracy_m = meters;
        self
    }

    pub fn source(mut self, source: LocationSource) -> Self {
        self.source = source;
        self
    }

    /// Validated position of this report.
    pub fn position(&self) -> GeoResult<GeoPoint> {
        GeoPoint::new_checked(self.lat, self.lon)
    }

    /// Check every field and return the validated position.
    ///
    /// Speed and accuracy must be finite and non-negative; a reported
    /// heading must lie in `[0, 360)`.
    pub fn validate(&self) -> GeoResult<GeoPoint> {
        let position = self.position()?;
        non_negative("speed_kmh", self.speed_kmh)?;
        non_negative("accuracy_m", self.accuracy_m)?;
        match self.heading_deg {
            Some(h) if !(0.0..360.0).contains(&h) => {
                Err(GeoError::InvalidMeasurement { field: "heading_deg", value: h })
            }
            _ => Ok(position),
        }
    }
}

fn non_negative(field: &'static str, value: f64) -> GeoResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GeoError::InvalidMeasurement { field, value })
    }
}

// ── LocationSample ────────────────────────────────────────────────────────────

/// An accepted, timestamped position fix.  Immutable once recorded.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationSample {
    pub asset_id:    AssetId,
    pub position:    GeoPoint,
    pub speed_kmh:   f64,
    pub heading_deg: f64,
    pub accuracy_m:  f64,
    pub timestamp:   DateTime<Utc>,
    pub source:      LocationSource,
}
