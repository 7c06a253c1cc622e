//! Read-side report types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use ft_core::{Asset, AssetId, AssetKind, AssetStatus, Containment, GeoPoint, GeofenceId};

/// One line of the fleet overview.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetSummary {
    pub id:        AssetId,
    pub name:      String,
    pub kind:      AssetKind,
    pub status:    AssetStatus,
    pub position:  GeoPoint,
    pub last_seen: DateTime<Utc>,
}

impl From<&Asset> for AssetSummary {
    fn from(a: &Asset) -> Self {
        Self {
            id:        a.id.clone(),
            name:      a.name.clone(),
            kind:      a.kind.clone(),
            status:    a.status,
            position:  a.position,
            last_seen: a.last_seen,
        }
    }
}

/// Fleet-wide counts plus a summary per asset (ordered by id).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FleetStatus {
    pub total:     usize,
    /// Only statuses with at least one asset appear.
    pub by_status: BTreeMap<AssetStatus, usize>,
    pub assets:    Vec<AssetSummary>,
}

impl FleetStatus {
    pub fn from_assets(assets: &[Asset]) -> Self {
        let mut by_status = BTreeMap::new();
        for a in assets {
            *by_status.entry(a.status).or_insert(0) += 1;
        }
        Self {
            total: assets.len(),
            by_status,
            assets: assets.iter().map(AssetSummary::from).collect(),
        }
    }

    /// Number of assets currently in `status`.
    pub fn count(&self, status: AssetStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

/// Whether an asset's current position is inside one zone.
#[derive(Clone, Debug, PartialEq)]
pub struct GeofenceCheck {
    pub asset_id:      AssetId,
    pub geofence_id:   GeofenceId,
    pub geofence_name: String,
    pub containment:   Containment,
}

impl GeofenceCheck {
    #[inline]
    pub fn inside(&self) -> bool {
        self.containment.inside
    }
}
