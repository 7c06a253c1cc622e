//! Backend tests for ft-store.
//!
//! The same checks run against every backend so the two stay
//! interchangeable behind the `Store` trait.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};

use ft_core::{
    Asset, AssetFilter, AssetId, AssetKind, AssetStatus, GeoPoint, Geofence, GeofenceEvent,
    GeofenceEventKind, GeofenceId, LocationSample, LocationSource,
};

use crate::Store;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 2, 6, 30, 0).unwrap()
}

fn at(minutes: i64) -> DateTime<Utc> {
    t0() + TimeDelta::minutes(minutes)
}

fn van(id: &str) -> Asset {
    Asset::new(id, format!("Van {id}"), AssetKind::Vehicle, GeoPoint::new(40.7128, -74.0060), t0())
        .with_metadata("plate", serde_json::json!("NY-1234"))
}

fn sample(id: &str, lat: f64, minutes: i64) -> LocationSample {
    LocationSample {
        asset_id:    id.into(),
        position:    GeoPoint::new(lat, -74.0),
        speed_kmh:   30.0,
        heading_deg: 12.5,
        accuracy_m:  5.0,
        timestamp:   at(minutes),
        source:      LocationSource::Wifi,
    }
}

fn event(id: &str, gf: &str, kind: GeofenceEventKind, minutes: i64) -> GeofenceEvent {
    GeofenceEvent {
        asset_id:    id.into(),
        geofence_id: gf.into(),
        kind,
        position:    GeoPoint::new(40.0, -74.0),
        timestamp:   at(minutes),
    }
}

// ── Shared conformance checks ─────────────────────────────────────────────────

fn assets_round_trip<S: Store>(store: &S) {
    let mut drone = Asset::new("d1", "Drone", AssetKind::Other("quadcopter".into()), GeoPoint::new(1.0, 2.0), t0());
    drone.status = AssetStatus::Maintenance;
    store.put_asset(&van("v2")).unwrap();
    store.put_asset(&van("v1")).unwrap();
    store.put_asset(&drone).unwrap();

    assert_eq!(store.get_asset(&"v1".into()).unwrap(), Some(van("v1")));
    assert_eq!(store.get_asset(&"d1".into()).unwrap(), Some(drone.clone()));
    assert_eq!(store.get_asset(&"nope".into()).unwrap(), None);

    let all: Vec<AssetId> = store.list_assets(&AssetFilter::all()).unwrap().into_iter().map(|a| a.id).collect();
    assert_eq!(all, [AssetId::from("d1"), "v1".into(), "v2".into()]);

    let maint = store.list_assets(&AssetFilter::all().status(AssetStatus::Maintenance)).unwrap();
    assert_eq!(maint, [drone]);
    let vans = store.list_assets(&AssetFilter::all().kind(AssetKind::Vehicle)).unwrap();
    assert_eq!(vans.len(), 2);

    // Replace keeps one row.
    let mut moved = van("v1");
    moved.position = GeoPoint::new(41.0, -73.0);
    store.put_asset(&moved).unwrap();
    assert_eq!(store.get_asset(&"v1".into()).unwrap().unwrap().position, moved.position);
    assert_eq!(store.list_assets(&AssetFilter::all()).unwrap().len(), 3);
}

fn locations_ordered_and_windowed<S: Store>(store: &S) {
    store.append_location(&sample("v1", 40.1, 0)).unwrap();
    store.append_location(&sample("v1", 40.3, 20)).unwrap();
    store.append_location(&sample("v1", 40.2, 10)).unwrap(); // late arrival
    store.append_location(&sample("v2", 41.0, 5)).unwrap();

    let h = store.list_locations(&"v1".into(), t0()).unwrap();
    let lats: Vec<f64> = h.iter().map(|s| s.position.lat).collect();
    assert_eq!(lats, [40.1, 40.2, 40.3]);
    assert_eq!(h[0], sample("v1", 40.1, 0));

    let recent = store.list_locations(&"v1".into(), at(10)).unwrap();
    assert_eq!(recent.len(), 2, "since is inclusive");
    assert!(store.list_locations(&"ghost".into(), t0()).unwrap().is_empty());
}

fn geofences_active_only<S: Store>(store: &S) {
    let a = Geofence::circle("gf-b", "B", GeoPoint::new(0.0, 0.0), 1.0, t0());
    let b = Geofence::circle("gf-a", "A", GeoPoint::new(1.0, 1.0), 2.0, t0());
    let mut c = Geofence::circle("gf-c", "C", GeoPoint::new(2.0, 2.0), 3.0, t0());
    c.active = false;
    for f in [&a, &b, &c] {
        store.put_geofence(f).unwrap();
    }

    let active: Vec<_> = store.list_active_geofences().unwrap().into_iter().map(|f| f.id).collect();
    assert_eq!(active, [GeofenceId::from("gf-a"), GeofenceId::from("gf-b")]);
    assert_eq!(store.get_geofence(&"gf-c".into()).unwrap(), Some(c));
    assert_eq!(store.get_geofence(&"gf-z".into()).unwrap(), None);
}

fn events_newest_first<S: Store>(store: &S) {
    store.append_geofence_event(&event("v1", "gf-a", GeofenceEventKind::Enter, 0)).unwrap();
    store.append_geofence_event(&event("v2", "gf-a", GeofenceEventKind::Enter, 5)).unwrap();
    store.append_geofence_event(&event("v1", "gf-a", GeofenceEventKind::Exit, 10)).unwrap();

    let all = store.list_geofence_events(None, t0()).unwrap();
    let mins: Vec<i64> = all.iter().map(|e| (e.timestamp - t0()).num_minutes()).collect();
    assert_eq!(mins, [10, 5, 0]);

    let v1 = store.list_geofence_events(Some(&"v1".into()), t0()).unwrap();
    assert_eq!(v1.len(), 2);
    assert_eq!(v1[0].kind, GeofenceEventKind::Exit);

    let late = store.list_geofence_events(None, at(5)).unwrap();
    assert_eq!(late.len(), 2);
}

fn commit_update_is_visible_together<S: Store>(store: &S) {
    let mut v = van("v9");
    store.put_asset(&v).unwrap();

    let s = sample("v9", 40.72, 1);
    v.position = s.position;
    v.last_seen = s.timestamp;
    let events = [
        event("v9", "gf-a", GeofenceEventKind::Exit, 1),
        event("v9", "gf-b", GeofenceEventKind::Enter, 1),
    ];
    store.commit_update(&v, &s, &events).unwrap();

    assert_eq!(store.get_asset(&"v9".into()).unwrap().unwrap().position, s.position);
    assert_eq!(store.list_locations(&"v9".into(), t0()).unwrap(), [s]);
    let got = store.list_geofence_events(Some(&"v9".into()), t0()).unwrap();
    // Same timestamp: most recently recorded first.
    assert_eq!(got[0].geofence_id.as_str(), "gf-b");
    assert_eq!(got[1].geofence_id.as_str(), "gf-a");
}

fn run_all<S: Store>(make: impl Fn() -> S) {
    assets_round_trip(&make());
    locations_ordered_and_windowed(&make());
    geofences_active_only(&make());
    events_newest_first(&make());
    commit_update_is_visible_together(&make());
}

// ── Backends ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod memory {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn conformance() {
        run_all(MemoryStore::new);
    }

    #[test]
    fn location_count() {
        let store = MemoryStore::new();
        store.append_location(&sample("a", 1.0, 0)).unwrap();
        store.append_location(&sample("b", 1.0, 0)).unwrap();
        assert_eq!(store.location_count(), 2);
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod sqlite {
    use super::*;
    use crate::SqliteStore;

    #[test]
    fn conformance() {
        run_all(|| SqliteStore::open_in_memory().unwrap());
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("fleet.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.put_asset(&van("v1")).unwrap();
            store.append_location(&sample("v1", 40.5, 3)).unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        let v = store.get_asset(&"v1".into()).unwrap().unwrap();
        assert_eq!(v.metadata["plate"], serde_json::json!("NY-1234"));
        assert_eq!(store.list_locations(&"v1".into(), t0()).unwrap().len(), 1);
    }
}
