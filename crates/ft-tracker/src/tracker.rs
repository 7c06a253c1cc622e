//! The `Tracker` struct: ingestion, zone management and fleet queries.

use std::time::Duration;

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use tracing::{debug, info, warn};

use ft_core::{
    Asset, AssetFilter, AssetId, AssetStatus, Clock, GeoPoint, Geofence, GeofenceEvent, GeofenceId,
    LocationReport, LocationSample, SystemClock, TrackerConfig,
};
use ft_geofence::{evaluate, validate_geofence};
use ft_movement::{IdleReport, assess_idle, trip_distance_km};
use ft_spatial::{AssetIndex, Nearby, ProximityQuery};
use ft_store::Store;

use crate::{
    AssetLocks, FleetStatus, GeofenceCheck, NoopObserver, TrackError, TrackResult,
    TrackerObserver,
};

// ── Tracker ───────────────────────────────────────────────────────────────────

/// Coordinates location ingestion and queries over a [`Store`].
///
/// All methods take `&self`; share a `Tracker` between threads with `Arc` or
/// scoped borrows.  Updates to one asset are serialized through
/// [`AssetLocks`]; everything else relies on the store's own consistency.
pub struct Tracker<S: Store, C: Clock = SystemClock> {
    store:    S,
    clock:    C,
    config:   TrackerConfig,
    locks:    AssetLocks,
    observer: Box<dyn TrackerObserver>,
}

impl<S: Store> Tracker<S, SystemClock> {
    /// A tracker on the wall clock with default configuration.
    pub fn with_store(store: S) -> Self {
        Self::new(store, SystemClock, TrackerConfig::default())
    }
}

impl<S: Store, C: Clock> Tracker<S, C> {
    pub fn new(store: S, clock: C, config: TrackerConfig) -> Self {
        let locks = AssetLocks::new(config.lock_shards);
        Self { store, clock, config, locks, observer: Box::new(NoopObserver) }
    }

    /// Replace the observer notified after each committed update.
    pub fn with_observer(mut self, observer: impl TrackerObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ── Assets ────────────────────────────────────────────────────────────────

    /// Store a new asset (or replace an existing one with the same id).
    ///
    /// The registration position becomes the "previous" position for the
    /// first location report.
    ///
    /// Timestamps are truncated to whole milliseconds, the precision every
    /// store keeps.
    pub fn register_asset(&self, mut asset: Asset) -> TrackResult<Asset> {
        asset.position.validate()?;
        asset.created_at = to_millis(asset.created_at);
        asset.last_seen = to_millis(asset.last_seen);
        let _guard = self.locks.write(&asset.id);
        self.store.put_asset(&asset)?;
        info!(
            asset = %asset.id,
            kind = %asset.kind,
            position = %asset.position,
            "asset registered"
        );
        Ok(asset)
    }

    pub fn get_asset(&self, id: &AssetId) -> TrackResult<Asset> {
        self.store.get_asset(id)?.ok_or_else(|| TrackError::AssetNotFound(id.clone()))
    }

    /// Assets matching `filter`, ordered by id.
    pub fn list_assets(&self, filter: &AssetFilter) -> TrackResult<Vec<Asset>> {
        Ok(self.store.list_assets(filter)?)
    }

    /// Change an asset's operational status.  Position and history are untouched.
    pub fn set_status(&self, id: &AssetId, status: AssetStatus) -> TrackResult<Asset> {
        let _guard = self.locks.write(id);
        let mut asset = self.get_asset(id)?;
        let from = asset.status;
        asset.status = status;
        self.store.put_asset(&asset)?;
        info!(asset = %id, %from, to = %status, "status changed");
        Ok(asset)
    }

    // ── Ingestion ─────────────────────────────────────────────────────────────

    /// Accept one location report for `asset_id`.
    ///
    /// On success the sample, the asset's new state and any geofence
    /// transitions are committed together and the recorded sample is
    /// returned.  An invalid coordinate, an out-of-range speed, accuracy or
    /// heading, or an unknown asset fails before anything is written.  The
    /// sample is stamped at millisecond precision so the returned value is
    /// exactly what the store holds.
    ///
    /// If the report carries no heading, one is derived as the initial
    /// bearing from the previous position (or the previous heading is kept
    /// when the asset has not moved).
    pub fn submit_location(
        &self,
        asset_id: &AssetId,
        report:   LocationReport,
    ) -> TrackResult<LocationSample> {
        let position = report.validate().inspect_err(|e| {
            warn!(asset = %asset_id, error = %e, "location report rejected");
        })?;

        let _guard = self.locks.write(asset_id);
        let mut asset = self.get_asset(asset_id)?;
        let previous = asset.position;

        let heading_deg = match report.heading_deg {
            Some(h) => h,
            None if previous != position => previous.bearing_deg(position),
            None => asset.heading_deg,
        };
        let now = to_millis(self.clock.now());

        let sample = LocationSample {
            asset_id:    asset_id.clone(),
            position,
            speed_kmh:   report.speed_kmh,
            heading_deg,
            accuracy_m:  report.accuracy_m,
            timestamp:   now,
            source:      report.source,
        };

        let fences = self.store.list_active_geofences()?;
        let events = evaluate(asset_id, previous, position, &fences, now);

        asset.position = position;
        asset.speed_kmh = report.speed_kmh;
        asset.heading_deg = heading_deg;
        asset.last_seen = now;

        self.store.commit_update(&asset, &sample, &events)?;

        debug!(
            asset = %asset_id,
            position = %position,
            speed_kmh = report.speed_kmh,
            heading_deg,
            source = %report.source,
            "location accepted"
        );
        self.observer.on_location(&sample);
        for e in &events {
            info!(asset = %e.asset_id, geofence = %e.geofence_id, kind = %e.kind, "geofence transition");
            self.observer.on_geofence_event(e);
        }

        Ok(sample)
    }

    // ── Geofences ─────────────────────────────────────────────────────────────

    /// Validate and store a zone.  Active zones take part in every
    /// subsequent update.
    pub fn add_geofence(&self, mut fence: Geofence) -> TrackResult<Geofence> {
        validate_geofence(&fence)?;
        fence.created_at = to_millis(fence.created_at);
        self.store.put_geofence(&fence)?;
        info!(
            geofence = %fence.id,
            center = %fence.center,
            radius_km = fence.radius_km,
            active = fence.active,
            "geofence added"
        );
        Ok(fence)
    }

    /// Stop evaluating a zone.  Its past events are kept.
    pub fn deactivate_geofence(&self, id: &GeofenceId) -> TrackResult<Geofence> {
        let mut fence = self.get_geofence(id)?;
        fence.active = false;
        self.store.put_geofence(&fence)?;
        info!(geofence = %id, "geofence deactivated");
        Ok(fence)
    }

    pub fn get_geofence(&self, id: &GeofenceId) -> TrackResult<Geofence> {
        self.store.get_geofence(id)?.ok_or_else(|| TrackError::GeofenceNotFound(id.clone()))
    }

    /// Is the asset's current position inside `geofence_id`?
    ///
    /// Works on inactive zones too; activity only affects event emission.
    pub fn check_geofence(
        &self,
        asset_id:    &AssetId,
        geofence_id: &GeofenceId,
    ) -> TrackResult<GeofenceCheck> {
        let asset = {
            let _guard = self.locks.read(asset_id);
            self.get_asset(asset_id)?
        };
        let fence = self.get_geofence(geofence_id)?;
        Ok(GeofenceCheck {
            asset_id:      asset.id,
            geofence_id:   fence.id.clone(),
            geofence_name: fence.name.clone(),
            containment:   fence.containment(asset.position),
        })
    }

    /// Recorded transitions within the trailing `window`, newest first,
    /// optionally for a single asset.
    pub fn geofence_events(
        &self,
        asset_id: Option<&AssetId>,
        window:   Duration,
    ) -> TrackResult<Vec<GeofenceEvent>> {
        Ok(self.store.list_geofence_events(asset_id, self.since(window))?)
    }

    // ── History & movement ────────────────────────────────────────────────────

    /// Samples for `asset_id` within the trailing `window`, oldest first.
    pub fn history(&self, asset_id: &AssetId, window: Duration) -> TrackResult<Vec<LocationSample>> {
        let _guard = self.locks.read(asset_id);
        self.window_of(asset_id, window).map(|(_, samples)| samples)
    }

    /// Path length of the trailing `window`'s samples, km.
    pub fn trip_distance_km(&self, asset_id: &AssetId, window: Duration) -> TrackResult<f64> {
        Ok(trip_distance_km(&self.history(asset_id, window)?))
    }

    /// Idle check over the configured `idle_window`.
    pub fn detect_idle(&self, asset_id: &AssetId) -> TrackResult<IdleReport> {
        self.detect_idle_within(asset_id, self.config.idle_window)
    }

    /// Idle check over an explicit trailing `window`.
    ///
    /// Idle means the samples in the window cover less than
    /// `idle_threshold_km` of cumulative path.  An asset with no samples in
    /// the window is idle.  The stored status is never changed.
    pub fn detect_idle_within(&self, asset_id: &AssetId, window: Duration) -> TrackResult<IdleReport> {
        let _guard = self.locks.read(asset_id);
        let (asset, samples) = self.window_of(asset_id, window)?;
        let report = assess_idle(&asset, &samples, self.config.idle_threshold_km, self.clock.now())?;
        debug!(
            asset = %asset_id,
            idle = report.idle,
            total_km = report.total_km,
            points = report.points,
            "idle check"
        );
        Ok(report)
    }

    // ── Fleet queries ─────────────────────────────────────────────────────────

    /// Assets within `query.radius_km` of `query.center`, nearest first.
    ///
    /// With `spatial_index` set in the config the snapshot is loaded into an
    /// R-tree first; the result is the same either way.
    pub fn nearby(&self, query: &ProximityQuery) -> TrackResult<Vec<Nearby>> {
        query.validate()?;
        let filter = AssetFilter { status: query.status, kind: query.kind.clone() };
        let assets = self.store.list_assets(&filter)?;
        if self.config.spatial_index {
            Ok(AssetIndex::build(assets).within(query)?)
        } else {
            Ok(ft_spatial::nearby(query, &assets)?)
        }
    }

    /// The closest asset matching `filter` to `point`, if any.
    pub fn nearest(&self, point: GeoPoint, filter: &AssetFilter) -> TrackResult<Option<Nearby>> {
        point.validate()?;
        let index = AssetIndex::build(self.store.list_assets(filter)?);
        Ok(index.nearest(point))
    }

    /// Counts by status plus a summary line per asset.
    pub fn fleet_status(&self) -> TrackResult<FleetStatus> {
        let assets = self.store.list_assets(&AssetFilter::all())?;
        Ok(FleetStatus::from_assets(&assets))
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Start of the trailing `window` ending now.  Windows too large for
    /// chrono saturate to the earliest representable instant.
    fn since(&self, window: Duration) -> DateTime<Utc> {
        let now = self.clock.now();
        TimeDelta::from_std(window)
            .ok()
            .and_then(|w| now.checked_sub_signed(w))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// The asset plus its samples in the trailing `window`.  Caller holds
    /// the asset's lock.
    fn window_of(&self, asset_id: &AssetId, window: Duration) -> TrackResult<(Asset, Vec<LocationSample>)> {
        let asset = self.get_asset(asset_id)?;
        let samples = self.store.list_locations(asset_id, self.since(window))?;
        Ok((asset, samples))
    }
}

/// Drop sub-millisecond precision.
fn to_millis(t: DateTime<Utc>) -> DateTime<Utc> {
    t.duration_trunc(TimeDelta::milliseconds(1)).unwrap_or(t)
}
