//! Geofence zones and the transition events they produce.

use chrono::{DateTime, Utc};

use crate::{AssetId, GeoPoint, GeofenceId};

/// Zone geometry.  Only circles are modelled.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[non_exhaustive]
pub enum GeofenceShape {
    #[default]
    Circle,
}

impl GeofenceShape {
    pub fn as_str(self) -> &'static str {
        match self {
            GeofenceShape::Circle => "circle",
        }
    }
}

/// A circular zone: every point within `radius_km` of `center` (inclusive)
/// is inside.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geofence {
    pub id:         GeofenceId,
    pub name:       String,
    pub center:     GeoPoint,
    pub radius_km:  f64,
    pub shape:      GeofenceShape,
    pub active:     bool,
    pub created_at: DateTime<Utc>,
}

impl Geofence {
    /// An active circular zone.
    pub fn circle(
        id:        impl Into<GeofenceId>,
        name:      impl Into<String>,
        center:    GeoPoint,
        radius_km: f64,
        now:       DateTime<Utc>,
    ) -> Self {
        Self {
            id:         id.into(),
            name:       name.into(),
            center,
            radius_km,
            shape:      GeofenceShape::Circle,
            active:     true,
            created_at: now,
        }
    }

    /// `true` if `point` lies inside or exactly on the boundary.
    #[inline]
    pub fn contains(&self, point: GeoPoint) -> bool {
        self.center.distance_km(point) <= self.radius_km
    }

    /// Inside/outside verdict together with the distance it was based on.
    pub fn containment(&self, point: GeoPoint) -> Containment {
        let distance_km = self.center.distance_km(point);
        Containment {
            inside: distance_km <= self.radius_km,
            distance_km,
            radius_km: self.radius_km,
        }
    }
}

/// Result of testing one point against one zone.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Containment {
    pub inside:      bool,
    pub distance_km: f64,
    pub radius_km:   f64,
}

// ── Events ────────────────────────────────────────────────────────────────────

/// Kind of geofence transition.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GeofenceEventKind {
    Enter,
    Exit,
    /// Reserved; never emitted by the evaluator.
    Dwell,
}

impl GeofenceEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GeofenceEventKind::Enter => "enter",
            GeofenceEventKind::Exit  => "exit",
            GeofenceEventKind::Dwell => "dwell",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "enter" => Some(GeofenceEventKind::Enter),
            "exit"  => Some(GeofenceEventKind::Exit),
            "dwell" => Some(GeofenceEventKind::Dwell),
            _       => None,
        }
    }
}

impl std::fmt::Display for GeofenceEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An asset crossed a zone boundary.  Immutable once recorded.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeofenceEvent {
    pub asset_id:    AssetId,
    pub geofence_id: GeofenceId,
    pub kind:        GeofenceEventKind,
    /// Asset position that triggered the transition.
    pub position:    GeoPoint,
    pub timestamp:   DateTime<Utc>,
}
