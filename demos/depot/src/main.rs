//! depot — smallest end-to-end run of the fleet_tracker engine.
//!
//! Registers a delivery truck and a survey drone at a Lower Manhattan depot,
//! loads a warehouse zone from CSV, drives the truck north out of the zone
//! in ten GPS reports, and prints every query the tracker offers.
//!
//! Usage: `depot [config.json]`.  The optional JSON file overrides any
//! subset of `TrackerConfig`.  Set `RUST_LOG=debug` to see per-sample logs.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{TimeDelta, Utc};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use ft_core::{
    Asset, AssetFilter, AssetKind, Clock, GeoPoint, LocationReport, LocationSource, ManualClock,
    TrackerConfig, distance_km,
};
use ft_geofence::load_geofences_reader;
use ft_movement::IdleReason;
use ft_spatial::ProximityQuery;
use ft_store::{MemoryStore, Store};
use ft_tracker::Tracker;

// ── Constants ─────────────────────────────────────────────────────────────────

const DEPOT:         GeoPoint = GeoPoint::new(40.7128, -74.0060);
const EMPIRE_STATE:  GeoPoint = GeoPoint::new(40.7484, -73.9857);
const STEPS:         usize    = 10;
const STEP_DEG:      f64      = 0.005; // ~0.56 km of latitude per report
const STEP_MINUTES:  i64      = 3;
const SEED:          u64      = 7;

// ── Zones CSV ─────────────────────────────────────────────────────────────────

const ZONES_CSV: &str = "\
id,name,center_lat,center_lon,radius_km,active\n\
warehouse,Warehouse,40.7128,-74.0060,1.0,true\n\
midtown,Midtown delivery area,40.7549,-73.9840,1.5,true\n\
pier-40,Pier 40 (closed),40.7295,-74.0110,0.4,false\n\
";

// ── Entry point ───────────────────────────────────────────────────────────────

fn load_config(path: Option<&str>) -> Result<TrackerConfig> {
    let Some(path) = path else {
        return Ok(TrackerConfig::default());
    };
    let text = std::fs::read_to_string(Path::new(path))
        .with_context(|| format!("reading config {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {path}"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config = load_config(args.get(1).map(String::as_str))?;

    println!("=== depot — fleet_tracker demo ===");
    println!(
        "Idle threshold: {} km over {} min  |  Lock shards: {}  |  R-tree proximity: {}",
        config.idle_threshold_km,
        config.idle_window.as_secs() / 60,
        config.lock_shards,
        config.spatial_index,
    );
    println!(
        "Depot → Empire State Building: {:.3} km",
        distance_km(DEPOT, EMPIRE_STATE)
    );
    println!();

    let clock = Arc::new(ManualClock::new(Utc::now()));
    let history_window = config.history_window;
    let tracker = Tracker::new(MemoryStore::new(), clock.clone(), config);

    // ── Zones ─────────────────────────────────────────────────────────────────

    let zones = load_geofences_reader(Cursor::new(ZONES_CSV), clock.now())?;
    let loaded = zones.len();
    for zone in zones {
        tracker.add_geofence(zone)?;
    }
    let active = tracker.store().list_active_geofences()?.len();
    println!("Loaded {loaded} zones ({active} active)");

    // ── Fleet ─────────────────────────────────────────────────────────────────

    let now = clock.now();
    let truck = tracker
        .register_asset(
            Asset::new("t1", "Delivery truck 1", AssetKind::Vehicle, DEPOT, now)
                .with_metadata("plate", serde_json::json!("NY-4471")),
        )?
        .id;
    let drone = tracker
        .register_asset(Asset::new("d1", "Survey drone 1", AssetKind::Drone, DEPOT, now))?
        .id;
    println!("Registered {truck} and {drone} at {DEPOT}");
    println!();

    // ── Drive north ───────────────────────────────────────────────────────────

    let mut rng = SmallRng::seed_from_u64(SEED);
    for step in 1..=STEPS {
        clock.advance(TimeDelta::minutes(STEP_MINUTES));
        let lat = DEPOT.lat + step as f64 * STEP_DEG;
        let report = LocationReport::at(lat, DEPOT.lon)
            .speed(rng.gen_range(25.0..45.0))
            .accuracy(rng.gen_range(3.0..12.0))
            .source(LocationSource::Gps);
        tracker.submit_location(&truck, report)?;
    }
    // The drone hovers over the depot.
    for _ in 0..3 {
        let jitter = rng.gen_range(-0.0001..0.0001);
        tracker.submit_location(&drone, LocationReport::at(DEPOT.lat + jitter, DEPOT.lon))?;
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    let history = tracker.history(&truck, history_window)?;
    println!("{:<5} {:<26} {:>9} {:>8}", "Step", "Position", "km/h", "Heading");
    println!("{}", "-".repeat(51));
    for (i, s) in history.iter().enumerate() {
        println!(
            "{:<5} {:<26} {:>9.1} {:>8.1}",
            i + 1,
            s.position.to_string(),
            s.speed_kmh,
            s.heading_deg,
        );
    }
    println!();

    println!("Trip distance (t1): {:.3} km", tracker.trip_distance_km(&truck, history_window)?);
    for id in [&truck, &drone] {
        let idle = tracker.detect_idle(id)?;
        let why = match idle.reason {
            IdleReason::NoRecentReports { since_last_seen } => {
                format!("no reports for {} min", since_last_seen.num_minutes())
            }
            IdleReason::Stationary => "stationary".to_string(),
            IdleReason::Moving => "moving".to_string(),
        };
        println!(
            "Idle ({id}): {}  [{why}, {:.3} km over {} points]",
            idle.idle, idle.total_km, idle.points
        );
    }
    println!();

    for zone in ["warehouse", "midtown"] {
        let check = tracker.check_geofence(&truck, &zone.into())?;
        println!(
            "t1 inside {:<22} {:<5}  ({:.3} km from center, radius {} km)",
            check.geofence_name,
            check.inside(),
            check.containment.distance_km,
            check.containment.radius_km,
        );
    }
    println!();

    println!("Geofence events (newest first):");
    for e in tracker.geofence_events(None, history_window)? {
        println!(
            "  {} {:<5} {:<10} at {}",
            e.asset_id,
            e.kind.as_str(),
            e.geofence_id.as_str(),
            e.position,
        );
    }
    println!();

    let query = ProximityQuery::new(DEPOT, 2.0);
    println!("Within {} km of the depot:", query.radius_km);
    for hit in tracker.nearby(&query)? {
        println!("  {:<4} {:<18} {:>7.3} km", hit.asset_id.as_str(), hit.name, hit.distance_km);
    }
    if let Some(hit) = tracker.nearest(EMPIRE_STATE, &AssetFilter::all())? {
        println!(
            "Closest to the Empire State Building: {} ({:.3} km)",
            hit.asset_id, hit.distance_km
        );
    }
    println!();

    let fleet = tracker.fleet_status()?;
    println!("Fleet: {} assets", fleet.total);
    for (status, count) in &fleet.by_status {
        println!("  {:<12} {count}", status.as_str());
    }
    let vehicles = tracker.list_assets(&AssetFilter::all().kind(AssetKind::Vehicle))?;
    println!("  vehicles     {}", vehicles.len());

    Ok(())
}
