//! Geographic coordinate type and great-circle math.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  All distances assume a
//! spherical Earth of radius [`EARTH_RADIUS_KM`]; this is not an ellipsoidal
//! model and carries the usual ~0.5 % error versus WGS-84 geodesics.

use crate::{GeoError, GeoResult};

/// Mean Earth radius used by every distance computation, kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Construct without validation.  Use [`GeoPoint::new_checked`] at any
    /// boundary where the values come from a caller.
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Construct a point, rejecting latitude outside `[-90, 90]`, longitude
    /// outside `[-180, 180]`, and NaN in either.  Values are never clamped.
    pub fn new_checked(lat: f64, lon: f64) -> GeoResult<Self> {
        let p = Self { lat, lon };
        p.validate()?;
        Ok(p)
    }

    /// Re-check an existing point against the coordinate ranges.
    pub fn validate(&self) -> GeoResult<()> {
        if (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon) {
            Ok(())
        } else {
            Err(GeoError::InvalidCoordinate { lat: self.lat, lon: self.lon })
        }
    }

    /// Haversine great-circle distance to `other`, in kilometres.
    #[inline]
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        distance_km(self, other)
    }

    /// Initial compass bearing from `self` toward `other`, in `[0, 360)`.
    #[inline]
    pub fn bearing_deg(self, other: GeoPoint) -> f64 {
        bearing_deg(self, other)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Haversine great-circle distance between `a` and `b`, in kilometres.
///
/// Symmetric and exactly `0.0` for identical points.  The longitude
/// difference goes straight into `sin`, so a pair straddling the ±180°
/// meridian needs no special casing.  The haversine term is clamped to
/// `[0, 1]` so rounding near antipodal points cannot produce NaN.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1   = a.lat.to_radians();
    let phi2   = b.lat.to_radians();
    let d_phi  = (b.lat - a.lat).to_radians();
    let d_lam  = (b.lon - a.lon).to_radians();

    let h = (d_phi * 0.5).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lam * 0.5).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Initial bearing from `a` toward `b` in degrees, normalised to `[0, 360)`.
///
/// 0° is north, angles increase clockwise.  For `a == b` the formula
/// degenerates to `atan2(0, 0)` and returns `0.0`; callers that care must
/// check for zero displacement themselves.
pub fn bearing_deg(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1  = a.lat.to_radians();
    let phi2  = b.lat.to_radians();
    let d_lam = (b.lon - a.lon).to_radians();

    let x = d_lam.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lam.cos();

    let deg = x.atan2(y).to_degrees().rem_euclid(360.0);
    // rem_euclid can round a tiny negative up to exactly 360.0.
    if deg >= 360.0 { 0.0 } else { deg }
}
