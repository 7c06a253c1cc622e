//! Unit tests for ft-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AssetId, GeofenceId};

    #[test]
    fn display_is_raw_string() {
        assert_eq!(AssetId::from("truck-7").to_string(), "truck-7");
        assert_eq!(GeofenceId::new(String::from("gf-wh")).as_str(), "gf-wh");
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(AssetId::from("a") < AssetId::from("b"));
        assert!(GeofenceId::from("gf-10") < GeofenceId::from("gf-2"));
    }
}

#[cfg(test)]
mod geo {
    use crate::{EARTH_RADIUS_KM, GeoError, GeoPoint, bearing_deg, distance_km};

    fn p(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon)
    }

    #[test]
    fn zero_distance() {
        for pt in [p(40.7128, -74.0060), p(90.0, 0.0), p(-90.0, 180.0), p(0.0, -180.0)] {
            assert_eq!(distance_km(pt, pt), 0.0, "at {pt}");
        }
    }

    #[test]
    fn symmetric() {
        let a = p(40.7128, -74.0060);
        let b = p(-33.8688, 151.2093);
        assert_eq!(distance_km(a, b), distance_km(b, a));
    }

    #[test]
    fn manhattan_fixture() {
        // Lower to midtown Manhattan; spherical haversine gives ~5.9 km.
        let d = distance_km(p(40.7128, -74.0060), p(40.7614, -73.9776));
        assert!(d > 5.0 && d < 6.0, "got {d}");
    }

    #[test]
    fn one_degree_latitude() {
        let d = distance_km(p(30.0, -88.0), p(31.0, -88.0));
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn across_date_line_is_short() {
        let d = distance_km(p(0.0, 179.9), p(0.0, -179.9));
        assert!((d - 22.239).abs() < 0.01, "got {d}");
    }

    #[test]
    fn near_pole_is_short() {
        // Opposite meridians, both 0.1° from the pole.
        let d = distance_km(p(89.9, 0.0), p(89.9, 180.0));
        assert!((d - 22.239).abs() < 0.01, "got {d}");
    }

    #[test]
    fn antipodal_is_half_circumference() {
        let d = distance_km(p(0.0, 0.0), p(0.0, 180.0));
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!(d.is_finite());
        assert!((d - half).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn bearing_due_north() {
        let b = bearing_deg(p(0.0, 0.0), p(1.0, 0.0));
        assert!(b.abs() < 1.0, "got {b}");
    }

    #[test]
    fn bearing_cardinals() {
        let east = bearing_deg(p(0.0, 0.0), p(0.0, 1.0));
        let south = bearing_deg(p(0.0, 0.0), p(-1.0, 0.0));
        let west = bearing_deg(p(0.0, 0.0), p(0.0, -1.0));
        assert!((east - 90.0).abs() < 1e-9);
        assert!((south - 180.0).abs() < 1e-9);
        assert!((west - 270.0).abs() < 1e-9);
    }

    #[test]
    fn bearing_in_range() {
        let pts = [p(10.0, 10.0), p(-45.0, 170.0), p(60.0, -179.0), p(-89.0, 3.0)];
        for a in pts {
            for b in pts {
                let br = bearing_deg(a, b);
                assert!((0.0..360.0).contains(&br), "{a} -> {b}: {br}");
            }
        }
    }

    #[test]
    fn bearing_to_self_is_zero() {
        let a = p(12.5, 45.0);
        assert_eq!(bearing_deg(a, a), 0.0);
    }

    #[test]
    fn checked_rejects_out_of_range() {
        assert_eq!(
            GeoPoint::new_checked(95.0, 0.0),
            Err(GeoError::InvalidCoordinate { lat: 95.0, lon: 0.0 })
        );
        assert!(GeoPoint::new_checked(0.0, -180.5).is_err());
        assert!(GeoPoint::new_checked(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new_checked(90.0, 180.0).is_ok());
        assert!(GeoPoint::new_checked(-90.0, -180.0).is_ok());
    }
}

#[cfg(test)]
mod model {
    use chrono::{TimeZone, Utc};

    use crate::{
        Asset, AssetFilter, AssetKind, AssetStatus, GeoError, GeoPoint, Geofence,
        GeofenceEventKind, LocationReport, LocationSource,
    };

    #[test]
    fn asset_kind_is_open() {
        assert_eq!(AssetKind::from("drone"), AssetKind::Drone);
        assert_eq!(AssetKind::from("forklift"), AssetKind::Other("forklift".into()));
        assert_eq!(AssetKind::from("forklift").as_str(), "forklift");
    }

    #[test]
    fn status_and_source_round_trip_labels() {
        for s in [AssetStatus::Active, AssetStatus::Idle, AssetStatus::Offline, AssetStatus::Maintenance] {
            assert_eq!(AssetStatus::parse(s.as_str()), Some(s));
        }
        for s in [LocationSource::Gps, LocationSource::Cell, LocationSource::Wifi, LocationSource::Manual] {
            assert_eq!(LocationSource::parse(s.as_str()), Some(s));
        }
        assert_eq!(GeofenceEventKind::parse("teleport"), None);
    }

    #[test]
    fn filter_matches() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let a = Asset::new("d1", "Drone-1", AssetKind::Drone, GeoPoint::new(0.0, 0.0), now);
        assert!(AssetFilter::all().matches(&a));
        assert!(AssetFilter::all().kind(AssetKind::Drone).matches(&a));
        assert!(!AssetFilter::all().kind(AssetKind::Vehicle).matches(&a));
        assert!(!AssetFilter::all().status(AssetStatus::Offline).matches(&a));
    }

    #[test]
    fn report_defaults() {
        let r = LocationReport::at(1.0, 2.0);
        assert_eq!(r.heading_deg, None);
        assert_eq!(r.accuracy_m, 10.0);
        assert_eq!(r.source, LocationSource::Gps);
        assert_eq!(r.heading(0.0).heading_deg, Some(0.0));
    }

    #[test]
    fn report_measurements_checked() {
        let ok = LocationReport::at(1.0, 2.0).speed(0.0).accuracy(0.0).heading(359.9);
        assert_eq!(ok.validate(), Ok(GeoPoint::new(1.0, 2.0)));

        let bad = [
            (LocationReport::at(1.0, 2.0).speed(-1.0), "speed_kmh"),
            (LocationReport::at(1.0, 2.0).speed(f64::INFINITY), "speed_kmh"),
            (LocationReport::at(1.0, 2.0).accuracy(f64::NAN), "accuracy_m"),
            (LocationReport::at(1.0, 2.0).heading(360.0), "heading_deg"),
            (LocationReport::at(1.0, 2.0).heading(-0.5), "heading_deg"),
        ];
        for (r, want) in bad {
            match r.validate() {
                Err(GeoError::InvalidMeasurement { field, .. }) => assert_eq!(field, want),
                other => panic!("{r:?} gave {other:?}"),
            }
        }

        // Position is checked first.
        let r = LocationReport::at(95.0, 0.0).speed(-1.0);
        assert!(matches!(r.validate(), Err(GeoError::InvalidCoordinate { .. })));
    }

    #[test]
    fn geofence_boundary_is_inside() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let center = GeoPoint::new(0.0, 0.0);
        let edge = GeoPoint::new(0.0, 1.0);
        let r = center.distance_km(edge);
        let gf = Geofence::circle("gf", "Edge", center, r, now);
        assert!(gf.contains(edge));
        let c = gf.containment(GeoPoint::new(0.0, 2.0));
        assert!(!c.inside);
        assert!(c.distance_km > c.radius_km);
    }
}

#[cfg(test)]
mod time {
    use chrono::{TimeDelta, TimeZone, Utc};

    use crate::{Clock, ManualClock};

    #[test]
    fn manual_clock_advances() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        assert_eq!(clock.now(), start);
        clock.advance(TimeDelta::minutes(5));
        assert_eq!(clock.now(), start + TimeDelta::minutes(5));
        clock.set(start);
        assert_eq!(clock.now(), start);
    }
}
