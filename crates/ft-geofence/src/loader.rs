//! CSV geofence loader.
//!
//! # CSV format
//!
//! One row per zone.  `active` is optional and defaults to `true`.
//!
//! ```csv
//! id,name,center_lat,center_lon,radius_km,active
//! gf-wh,Warehouse,40.7128,-74.0060,1.0,true
//! gf-port,Port Newark,40.6840,-74.1502,2.5,
//! gf-old,Retired Yard,40.6501,-73.9496,0.8,false
//! ```
//!
//! Every row is validated with [`validate_geofence`]; the first bad row
//! aborts the load.  Row numbers in errors are 1-based and count data rows
//! only (the header is not row 1).

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use ft_core::{GeoPoint, Geofence, GeofenceShape};

use crate::{GeofenceError, GeofenceResult, validate_geofence};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct GeofenceRecord {
    id:         String,
    name:       String,
    center_lat: f64,
    center_lon: f64,
    radius_km:  f64,
    #[serde(default)]
    active:     Option<bool>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load zone definitions from a CSV file.  Every zone gets `created_at`.
pub fn load_geofences_csv(path: &Path, created_at: DateTime<Utc>) -> GeofenceResult<Vec<Geofence>> {
    let file = std::fs::File::open(path)?;
    let fences = load_geofences_reader(file, created_at)?;
    info!(path = %path.display(), count = fences.len(), "loaded geofences");
    Ok(fences)
}

/// Like [`load_geofences_csv`] but accepts any `Read` source.
pub fn load_geofences_reader<R: Read>(
    reader:     R,
    created_at: DateTime<Utc>,
) -> GeofenceResult<Vec<Geofence>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    csv_reader
        .deserialize::<GeofenceRecord>()
        .enumerate()
        .map(|(i, result)| {
            let row = i + 1;
            let r = result.map_err(|e| GeofenceError::Parse { row, message: e.to_string() })?;
            let fence = Geofence {
                id:         r.id.into(),
                name:       r.name,
                center:     GeoPoint::new(r.center_lat, r.center_lon),
                radius_km:  r.radius_km,
                shape:      GeofenceShape::Circle,
                active:     r.active.unwrap_or(true),
                created_at,
            };
            validate_geofence(&fence).map_err(|e| GeofenceError::Parse { row, message: e.to_string() })?;
            Ok(fence)
        })
        .collect()
}
