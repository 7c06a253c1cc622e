//! The `Store` trait implemented by all storage backends.

use chrono::{DateTime, Utc};

use ft_core::{
    Asset, AssetFilter, AssetId, Geofence, GeofenceEvent, GeofenceId, LocationSample,
};

use crate::StoreResult;

/// Storage collaborator for the tracking engine.
///
/// Every method takes `&self`; implementations provide their own interior
/// locking so a single store can be shared across ingest threads.  Per-asset
/// ordering (read previous state → write new state) is the tracker's job,
/// not the store's.
pub trait Store: Send + Sync {
    // ── Assets ────────────────────────────────────────────────────────────

    fn get_asset(&self, id: &AssetId) -> StoreResult<Option<Asset>>;

    /// Insert or replace by `asset.id`.
    fn put_asset(&self, asset: &Asset) -> StoreResult<()>;

    /// Assets matching `filter`, ordered by id.
    fn list_assets(&self, filter: &AssetFilter) -> StoreResult<Vec<Asset>>;

    // ── Location history ──────────────────────────────────────────────────

    fn append_location(&self, sample: &LocationSample) -> StoreResult<()>;

    /// Samples for `asset` with `timestamp >= since`, ascending by time.
    /// Samples sharing a timestamp keep insertion order.
    fn list_locations(&self, asset: &AssetId, since: DateTime<Utc>) -> StoreResult<Vec<LocationSample>>;

    // ── Geofences ─────────────────────────────────────────────────────────

    /// Insert or replace by `fence.id`.
    fn put_geofence(&self, fence: &Geofence) -> StoreResult<()>;

    fn get_geofence(&self, id: &GeofenceId) -> StoreResult<Option<Geofence>>;

    /// Zones with `active == true`, ordered by id.
    fn list_active_geofences(&self) -> StoreResult<Vec<Geofence>>;

    // ── Geofence events ───────────────────────────────────────────────────

    fn append_geofence_event(&self, event: &GeofenceEvent) -> StoreResult<()>;

    /// Events with `timestamp >= since`, optionally for one asset only,
    /// newest first.  Events sharing a timestamp come out most recently
    /// recorded first.
    fn list_geofence_events(
        &self,
        asset: Option<&AssetId>,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<GeofenceEvent>>;

    // ── Atomic update ─────────────────────────────────────────────────────

    /// Append `sample`, replace `asset`, and append `events` as one unit:
    /// concurrent readers see all of it or none of it, and a failure leaves
    /// the store unchanged.
    fn commit_update(
        &self,
        asset:  &Asset,
        sample: &LocationSample,
        events: &[GeofenceEvent],
    ) -> StoreResult<()>;
}
