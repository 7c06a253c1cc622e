//! Unit tests for ft-geofence.

use std::io::Cursor;

use chrono::{DateTime, TimeZone, Utc};

use ft_core::{AssetId, GeoPoint, Geofence, GeofenceEventKind};

use crate::{GeofenceError, evaluate, load_geofences_csv, load_geofences_reader, transition, validate_geofence};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
}

/// 1 km zone around lower Manhattan.
fn depot() -> Geofence {
    Geofence::circle("gf-depot", "Depot", GeoPoint::new(40.7128, -74.0060), 1.0, t0())
}

const INSIDE: GeoPoint = GeoPoint::new(40.7150, -74.0060);   // ~0.25 km from center
const OUTSIDE: GeoPoint = GeoPoint::new(40.7400, -74.0060);  // ~3 km from center
const INSIDE_2: GeoPoint = GeoPoint::new(40.7110, -74.0040);

fn v1() -> AssetId {
    AssetId::from("v1")
}

// ── evaluate ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod evaluator {
    use super::*;

    #[test]
    fn outside_to_inside_is_single_enter() {
        let events = evaluate(&v1(), OUTSIDE, INSIDE, &[depot()], t0());
        assert_eq!(events.len(), 1);
        let e = &events[0];
        assert_eq!(e.kind, GeofenceEventKind::Enter);
        assert_eq!(e.geofence_id.as_str(), "gf-depot");
        assert_eq!(e.asset_id, v1());
        assert_eq!(e.position, INSIDE);
        assert_eq!(e.timestamp, t0());
    }

    #[test]
    fn inside_to_outside_is_single_exit() {
        let events = evaluate(&v1(), INSIDE, OUTSIDE, &[depot()], t0());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, GeofenceEventKind::Exit);
        assert_eq!(events[0].position, OUTSIDE);
    }

    #[test]
    fn unchanged_state_is_silent() {
        assert!(evaluate(&v1(), INSIDE, INSIDE_2, &[depot()], t0()).is_empty());
        assert!(evaluate(&v1(), INSIDE, INSIDE, &[depot()], t0()).is_empty());
        assert!(evaluate(&v1(), OUTSIDE, OUTSIDE, &[depot()], t0()).is_empty());
    }

    #[test]
    fn boundary_counts_as_inside() {
        let gf = depot();
        let edge = GeoPoint::new(40.7400, -74.0060);
        let exact = Geofence { radius_km: gf.center.distance_km(edge), ..gf };
        assert_eq!(transition(&exact, GeoPoint::new(40.80, -74.0060), edge), Some(GeofenceEventKind::Enter));
    }

    #[test]
    fn inactive_zones_skipped() {
        let mut gf = depot();
        gf.active = false;
        assert!(evaluate(&v1(), OUTSIDE, INSIDE, &[gf], t0()).is_empty());
    }

    #[test]
    fn one_event_per_zone_in_input_order() {
        let big = Geofence::circle("gf-city", "City", GeoPoint::new(40.7128, -74.0060), 50.0, t0());
        let far = Geofence::circle("gf-far", "Far", GeoPoint::new(0.0, 0.0), 1.0, t0());
        let fences = vec![depot(), far, big];

        // Moves from outside the depot (still inside the city) into the depot.
        let events = evaluate(&v1(), OUTSIDE, INSIDE, &fences, t0());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].geofence_id.as_str(), "gf-depot");

        // Jumps from the depot to the other side of the planet.
        let events = evaluate(&v1(), INSIDE, GeoPoint::new(0.0, 0.0), &fences, t0());
        let got: Vec<_> = events.iter().map(|e| (e.geofence_id.as_str(), e.kind)).collect();
        assert_eq!(
            got,
            [
                ("gf-depot", GeofenceEventKind::Exit),
                ("gf-far", GeofenceEventKind::Enter),
                ("gf-city", GeofenceEventKind::Exit),
            ]
        );
    }

    #[test]
    fn validate_rejects_bad_zones() {
        let mut gf = depot();
        gf.radius_km = 0.0;
        assert!(matches!(validate_geofence(&gf), Err(GeofenceError::InvalidRadius { .. })));
        gf.radius_km = f64::INFINITY;
        assert!(validate_geofence(&gf).is_err());
        let mut gf = depot();
        gf.center = GeoPoint::new(0.0, 200.0);
        assert!(matches!(validate_geofence(&gf), Err(GeofenceError::Geo(_))));
        assert!(validate_geofence(&depot()).is_ok());
    }
}

// ── loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use super::*;

    const ZONES_CSV: &str = "\
id,name,center_lat,center_lon,radius_km,active
gf-wh, Warehouse ,40.7128,-74.0060,1.0,true
gf-port,Port Newark,40.6840,-74.1502,2.5,
gf-old,Retired Yard,40.6501,-73.9496,0.8,false
";

    #[test]
    fn parses_rows() {
        let fences = load_geofences_reader(Cursor::new(ZONES_CSV), t0()).unwrap();
        assert_eq!(fences.len(), 3);
        assert_eq!(fences[0].name, "Warehouse");
        assert_eq!(fences[0].center, GeoPoint::new(40.7128, -74.0060));
        assert!(fences[1].active, "blank active defaults to true");
        assert!(!fences[2].active);
        assert!(fences.iter().all(|f| f.created_at == t0()));
    }

    #[test]
    fn reports_bad_row_number() {
        let csv = "id,name,center_lat,center_lon,radius_km,active\n\
                   ok,Ok,1.0,1.0,1.0,true\n\
                   bad,Bad,95.0,1.0,1.0,true\n";
        match load_geofences_reader(Cursor::new(csv), t0()) {
            Err(GeofenceError::Parse { row, .. }) => assert_eq!(row, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_radius_and_garbage() {
        let csv = "id,name,center_lat,center_lon,radius_km,active\nz,Z,1.0,1.0,0,\n";
        assert!(load_geofences_reader(Cursor::new(csv), t0()).is_err());
        let csv = "id,name,center_lat,center_lon,radius_km,active\nz,Z,north,1.0,1.0,\n";
        assert!(matches!(
            load_geofences_reader(Cursor::new(csv), t0()),
            Err(GeofenceError::Parse { row: 1, .. })
        ));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("zones.csv");
        std::fs::write(&path, ZONES_CSV).unwrap();
        assert_eq!(load_geofences_csv(&path, t0()).unwrap().len(), 3);

        let missing = dir.path().join("nope.csv");
        assert!(matches!(load_geofences_csv(&missing, t0()), Err(GeofenceError::Io(_))));
    }
}
