//! Enter/exit detection between two consecutive positions.

use chrono::{DateTime, Utc};

use ft_core::{AssetId, GeoPoint, Geofence, GeofenceEvent, GeofenceEventKind};

use crate::{GeofenceError, GeofenceResult};

/// The transition `prev → new` makes across `fence`'s boundary, if any.
///
/// Ignores `fence.active`; [`evaluate`] is responsible for skipping inactive
/// zones.
#[inline]
pub fn transition(fence: &Geofence, prev: GeoPoint, new: GeoPoint) -> Option<GeofenceEventKind> {
    match (fence.contains(prev), fence.contains(new)) {
        (false, true) => Some(GeofenceEventKind::Enter),
        (true, false) => Some(GeofenceEventKind::Exit),
        _             => None,
    }
}

/// All boundary crossings for one asset moving from `prev` to `new`.
///
/// Inactive zones in `fences` are skipped.  Events come out in the order of
/// `fences`, at most one per zone, each stamped with `at` and positioned at
/// `new`.  Passing `prev == new` always yields no events, which is what a
/// freshly registered asset's first report at its registration point gets.
pub fn evaluate(
    asset_id: &AssetId,
    prev:     GeoPoint,
    new:      GeoPoint,
    fences:   &[Geofence],
    at:       DateTime<Utc>,
) -> Vec<GeofenceEvent> {
    fences
        .iter()
        .filter(|f| f.active)
        .filter_map(|f| {
            transition(f, prev, new).map(|kind| GeofenceEvent {
                asset_id:    asset_id.clone(),
                geofence_id: f.id.clone(),
                kind,
                position:    new,
                timestamp:   at,
            })
        })
        .collect()
}

/// Check a zone definition before it is stored: the center must be a valid
/// coordinate and the radius strictly positive and finite.
pub fn validate_geofence(fence: &Geofence) -> GeofenceResult<()> {
    fence.center.validate()?;
    if !fence.radius_km.is_finite() || fence.radius_km <= 0.0 {
        return Err(GeofenceError::InvalidRadius {
            id:        fence.id.clone(),
            radius_km: fence.radius_km,
        });
    }
    Ok(())
}
