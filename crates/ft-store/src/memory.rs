//! In-process store.
//!
//! All state sits behind one `parking_lot::RwLock`.  Every trait method holds
//! the lock for its full duration, which is what makes
//! [`Store::commit_update`] atomic with respect to readers.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use ft_core::{
    Asset, AssetFilter, AssetId, Geofence, GeofenceEvent, GeofenceId, LocationSample,
};

use crate::{Store, StoreResult};

#[derive(Default)]
struct Inner {
    assets:    BTreeMap<AssetId, Asset>,
    /// Per-asset history in insertion order.
    locations: HashMap<AssetId, Vec<LocationSample>>,
    geofences: BTreeMap<GeofenceId, Geofence>,
    /// All events in insertion order.
    events:    Vec<GeofenceEvent>,
}

/// A [`Store`] that keeps everything in memory.  Nothing survives the
/// process.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of recorded samples across all assets.
    pub fn location_count(&self) -> usize {
        self.inner.read().locations.values().map(Vec::len).sum()
    }
}

impl Store for MemoryStore {
    fn get_asset(&self, id: &AssetId) -> StoreResult<Option<Asset>> {
        Ok(self.inner.read().assets.get(id).cloned())
    }

    fn put_asset(&self, asset: &Asset) -> StoreResult<()> {
        self.inner.write().assets.insert(asset.id.clone(), asset.clone());
        Ok(())
    }

    fn list_assets(&self, filter: &AssetFilter) -> StoreResult<Vec<Asset>> {
        Ok(self
            .inner
            .read()
            .assets
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect())
    }

    fn append_location(&self, sample: &LocationSample) -> StoreResult<()> {
        self.inner
            .write()
            .locations
            .entry(sample.asset_id.clone())
            .or_default()
            .push(sample.clone());
        Ok(())
    }

    fn list_locations(&self, asset: &AssetId, since: DateTime<Utc>) -> StoreResult<Vec<LocationSample>> {
        let inner = self.inner.read();
        let mut out: Vec<LocationSample> = inner
            .locations
            .get(asset)
            .map(|h| h.iter().filter(|s| s.timestamp >= since).cloned().collect())
            .unwrap_or_default();
        // Stable: equal timestamps keep insertion order.
        out.sort_by_key(|s| s.timestamp);
        Ok(out)
    }

    fn put_geofence(&self, fence: &Geofence) -> StoreResult<()> {
        self.inner.write().geofences.insert(fence.id.clone(), fence.clone());
        Ok(())
    }

    fn get_geofence(&self, id: &GeofenceId) -> StoreResult<Option<Geofence>> {
        Ok(self.inner.read().geofences.get(id).cloned())
    }

    fn list_active_geofences(&self) -> StoreResult<Vec<Geofence>> {
        Ok(self
            .inner
            .read()
            .geofences
            .values()
            .filter(|f| f.active)
            .cloned()
            .collect())
    }

    fn append_geofence_event(&self, event: &GeofenceEvent) -> StoreResult<()> {
        self.inner.write().events.push(event.clone());
        Ok(())
    }

    fn list_geofence_events(
        &self,
        asset: Option<&AssetId>,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<GeofenceEvent>> {
        let inner = self.inner.read();
        let mut out: Vec<GeofenceEvent> = inner
            .events
            .iter()
            .rev()
            .filter(|e| e.timestamp >= since && asset.is_none_or(|a| *a == e.asset_id))
            .cloned()
            .collect();
        out.sort_by_key(|e| Reverse(e.timestamp));
        Ok(out)
    }

    fn commit_update(
        &self,
        asset:  &Asset,
        sample: &LocationSample,
        events: &[GeofenceEvent],
    ) -> StoreResult<()> {
        let mut inner = self.inner.write();
        inner
            .locations
            .entry(sample.asset_id.clone())
            .or_default()
            .push(sample.clone());
        inner.assets.insert(asset.id.clone(), asset.clone());
        inner.events.extend_from_slice(events);
        Ok(())
    }
}
