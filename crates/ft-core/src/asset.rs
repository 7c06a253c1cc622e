//! Tracked assets and the filters used to list them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{AssetId, GeoPoint};

// ── AssetKind ─────────────────────────────────────────────────────────────────

/// What sort of thing an asset is.
///
/// The set is open: anything not covered by a named variant is carried as
/// [`AssetKind::Other`] with its original label.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum AssetKind {
    #[default]
    Vehicle,
    Drone,
    Container,
    Sensor,
    Robot,
    Other(String),
}

impl AssetKind {
    pub fn as_str(&self) -> &str {
        match self {
            AssetKind::Vehicle   => "vehicle",
            AssetKind::Drone     => "drone",
            AssetKind::Container => "container",
            AssetKind::Sensor    => "sensor",
            AssetKind::Robot     => "robot",
            AssetKind::Other(s)  => s,
        }
    }
}

impl From<&str> for AssetKind {
    fn from(s: &str) -> Self {
        match s {
            "vehicle"   => AssetKind::Vehicle,
            "drone"     => AssetKind::Drone,
            "container" => AssetKind::Container,
            "sensor"    => AssetKind::Sensor,
            "robot"     => AssetKind::Robot,
            other       => AssetKind::Other(other.to_owned()),
        }
    }
}

impl From<String> for AssetKind {
    fn from(s: String) -> Self {
        AssetKind::from(s.as_str())
    }
}

impl From<AssetKind> for String {
    fn from(k: AssetKind) -> String {
        k.as_str().to_owned()
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── AssetStatus ───────────────────────────────────────────────────────────────

/// Operational status.  Only ever changed by an explicit status update; the
/// engine derives idleness on demand and never writes it back here.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AssetStatus {
    #[default]
    Active,
    Idle,
    Offline,
    Maintenance,
}

impl AssetStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AssetStatus::Active      => "active",
            AssetStatus::Idle        => "idle",
            AssetStatus::Offline     => "offline",
            AssetStatus::Maintenance => "maintenance",
        }
    }

    /// Inverse of [`AssetStatus::as_str`].
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active"      => Some(AssetStatus::Active),
            "idle"        => Some(AssetStatus::Idle),
            "offline"     => Some(AssetStatus::Offline),
            "maintenance" => Some(AssetStatus::Maintenance),
            _             => None,
        }
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Asset ─────────────────────────────────────────────────────────────────────

/// Current state of one tracked asset.
///
/// `position`, `speed_kmh`, `heading_deg` and `last_seen` always reflect the
/// most recent accepted location sample (or the registration values if none
/// has been accepted yet).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Asset {
    pub id:          AssetId,
    pub name:        String,
    pub kind:        AssetKind,
    pub position:    GeoPoint,
    pub speed_kmh:   f64,
    pub heading_deg: f64,
    pub status:      AssetStatus,
    pub last_seen:   DateTime<Utc>,
    pub metadata:    BTreeMap<String, serde_json::Value>,
    pub created_at:  DateTime<Utc>,
}

impl Asset {
    /// A freshly registered, active, stationary asset at `position`.
    pub fn new(
        id:       impl Into<AssetId>,
        name:     impl Into<String>,
        kind:     AssetKind,
        position: GeoPoint,
        now:      DateTime<Utc>,
    ) -> Self {
        Self {
            id:          id.into(),
            name:        name.into(),
            kind,
            position,
            speed_kmh:   0.0,
            heading_deg: 0.0,
            status:      AssetStatus::Active,
            last_seen:   now,
            metadata:    BTreeMap::new(),
            created_at:  now,
        }
    }

    /// Attach one metadata entry (builder style).
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

// ── AssetFilter ───────────────────────────────────────────────────────────────

/// Optional status/kind predicates for listing assets.  An empty filter
/// matches everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssetFilter {
    pub status: Option<AssetStatus>,
    pub kind:   Option<AssetKind>,
}

impl AssetFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: AssetStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn kind(mut self, kind: AssetKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[inline]
    pub fn matches(&self, asset: &Asset) -> bool {
        self.status.is_none_or(|s| s == asset.status)
            && self.kind.as_ref().is_none_or(|k| *k == asset.kind)
    }
}
