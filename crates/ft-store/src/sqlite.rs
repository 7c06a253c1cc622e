//! SQLite backend (feature `sqlite`).
//!
//! Four tables: `assets`, `locations`, `geofences`, `geofence_events`.
//! Timestamps are stored as Unix epoch milliseconds so that ordering and
//! range predicates are plain integer comparisons; asset metadata is a JSON
//! text column.
//!
//! The connection sits behind a `parking_lot::Mutex`; every method holds it
//! for its full duration, and [`Store::commit_update`] runs inside a single
//! transaction.

use std::path::Path;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::info;

use ft_core::{
    Asset, AssetFilter, AssetId, AssetKind, AssetStatus, GeoPoint, Geofence, GeofenceEvent,
    GeofenceEventKind, GeofenceId, GeofenceShape, LocationSample, LocationSource,
};

use crate::{Store, StoreResult};

const SCHEMA: &str = "
    PRAGMA journal_mode = WAL;
    PRAGMA synchronous  = NORMAL;
    CREATE TABLE IF NOT EXISTS assets (
        id           TEXT PRIMARY KEY,
        name         TEXT NOT NULL,
        kind         TEXT NOT NULL,
        lat          REAL NOT NULL,
        lon          REAL NOT NULL,
        status       TEXT NOT NULL,
        last_seen    INTEGER NOT NULL,
        speed_kmh    REAL NOT NULL,
        heading_deg  REAL NOT NULL,
        metadata     TEXT NOT NULL DEFAULT '{}',
        created_at   INTEGER NOT NULL
    );
    CREATE TABLE IF NOT EXISTS locations (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        asset_id     TEXT NOT NULL,
        lat          REAL NOT NULL,
        lon          REAL NOT NULL,
        speed_kmh    REAL NOT NULL,
        heading_deg  REAL NOT NULL,
        accuracy_m   REAL NOT NULL,
        timestamp    INTEGER NOT NULL,
        source       TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_locations_asset_ts ON locations(asset_id, timestamp);
    CREATE TABLE IF NOT EXISTS geofences (
        id           TEXT PRIMARY KEY,
        name         TEXT NOT NULL,
        center_lat   REAL NOT NULL,
        center_lon   REAL NOT NULL,
        radius_km    REAL NOT NULL,
        shape        TEXT NOT NULL,
        active       INTEGER NOT NULL,
        created_at   INTEGER NOT NULL
    );
    CREATE TABLE IF NOT EXISTS geofence_events (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        asset_id     TEXT NOT NULL,
        geofence_id  TEXT NOT NULL,
        kind         TEXT NOT NULL,
        lat          REAL NOT NULL,
        lon          REAL NOT NULL,
        timestamp    INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_gf_events_asset_ts ON geofence_events(asset_id, timestamp);
";

const INSERT_LOCATION: &str = "\
    INSERT INTO locations \
    (asset_id, lat, lon, speed_kmh, heading_deg, accuracy_m, timestamp, source) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

const UPSERT_ASSET: &str = "\
    INSERT OR REPLACE INTO assets \
    (id, name, kind, lat, lon, status, last_seen, speed_kmh, heading_deg, metadata, created_at) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";

const INSERT_EVENT: &str = "\
    INSERT INTO geofence_events (asset_id, geofence_id, kind, lat, lon, timestamp) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const SELECT_ASSET: &str = "\
    SELECT id, name, kind, lat, lon, status, last_seen, speed_kmh, heading_deg, metadata, created_at \
    FROM assets";

const SELECT_GEOFENCE: &str = "\
    SELECT id, name, center_lat, center_lon, radius_km, shape, active, created_at FROM geofences";

/// A [`Store`] backed by a single SQLite database.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and initialise the schema.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self::init(conn)?;
        info!(path = %path.display(), "sqlite store ready");
        Ok(store)
    }

    /// A private, non-persistent database.  Useful for tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn: Mutex::new(conn) })
    }
}

// ── Row conversion ────────────────────────────────────────────────────────────

fn conversion_error(
    idx: usize,
    err: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, err.into())
}

fn millis(t: DateTime<Utc>) -> i64 {
    t.timestamp_millis()
}

fn timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let ms: i64 = row.get(idx)?;
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, format!("timestamp {ms} out of range").into()))
}

fn asset_from_row(row: &Row<'_>) -> rusqlite::Result<Asset> {
    let kind: String = row.get(2)?;
    let status: String = row.get(5)?;
    let metadata: String = row.get(9)?;
    Ok(Asset {
        id:          AssetId::new(row.get::<_, String>(0)?),
        name:        row.get(1)?,
        kind:        AssetKind::from(kind),
        position:    GeoPoint::new(row.get(3)?, row.get(4)?),
        status:      AssetStatus::parse(&status)
            .ok_or_else(|| conversion_error(5, format!("unknown asset status {status:?}")))?,
        last_seen:   timestamp_at(row, 6)?,
        speed_kmh:   row.get(7)?,
        heading_deg: row.get(8)?,
        metadata:    serde_json::from_str(&metadata).map_err(|e| conversion_error(9, e))?,
        created_at:  timestamp_at(row, 10)?,
    })
}

fn location_from_row(row: &Row<'_>) -> rusqlite::Result<LocationSample> {
    let source: String = row.get(7)?;
    Ok(LocationSample {
        asset_id:    AssetId::new(row.get::<_, String>(0)?),
        position:    GeoPoint::new(row.get(1)?, row.get(2)?),
        speed_kmh:   row.get(3)?,
        heading_deg: row.get(4)?,
        accuracy_m:  row.get(5)?,
        timestamp:   timestamp_at(row, 6)?,
        source:      LocationSource::parse(&source)
            .ok_or_else(|| conversion_error(7, format!("unknown location source {source:?}")))?,
    })
}

fn geofence_from_row(row: &Row<'_>) -> rusqlite::Result<Geofence> {
    let shape: String = row.get(5)?;
    Ok(Geofence {
        id:         GeofenceId::new(row.get::<_, String>(0)?),
        name:       row.get(1)?,
        center:     GeoPoint::new(row.get(2)?, row.get(3)?),
        radius_km:  row.get(4)?,
        shape:      match shape.as_str() {
            "circle" => GeofenceShape::Circle,
            other    => return Err(conversion_error(5, format!("unsupported geofence shape {other:?}"))),
        },
        active:     row.get::<_, i64>(6)? != 0,
        created_at: timestamp_at(row, 7)?,
    })
}

fn event_from_row(row: &Row<'_>) -> rusqlite::Result<GeofenceEvent> {
    let kind: String = row.get(2)?;
    Ok(GeofenceEvent {
        asset_id:    AssetId::new(row.get::<_, String>(0)?),
        geofence_id: GeofenceId::new(row.get::<_, String>(1)?),
        kind:        GeofenceEventKind::parse(&kind)
            .ok_or_else(|| conversion_error(2, format!("unknown event kind {kind:?}")))?,
        position:    GeoPoint::new(row.get(3)?, row.get(4)?),
        timestamp:   timestamp_at(row, 5)?,
    })
}

// ── Writes shared by single-row methods and commit_update ────────────────────

fn write_asset(conn: &Connection, a: &Asset) -> StoreResult<()> {
    let metadata = serde_json::to_string(&a.metadata)?;
    conn.prepare_cached(UPSERT_ASSET)?.execute(params![
        a.id.as_str(),
        a.name,
        a.kind.as_str(),
        a.position.lat,
        a.position.lon,
        a.status.as_str(),
        millis(a.last_seen),
        a.speed_kmh,
        a.heading_deg,
        metadata,
        millis(a.created_at),
    ])?;
    Ok(())
}

fn write_location(conn: &Connection, s: &LocationSample) -> StoreResult<()> {
    conn.prepare_cached(INSERT_LOCATION)?.execute(params![
        s.asset_id.as_str(),
        s.position.lat,
        s.position.lon,
        s.speed_kmh,
        s.heading_deg,
        s.accuracy_m,
        millis(s.timestamp),
        s.source.as_str(),
    ])?;
    Ok(())
}

fn write_event(conn: &Connection, e: &GeofenceEvent) -> StoreResult<()> {
    conn.prepare_cached(INSERT_EVENT)?.execute(params![
        e.asset_id.as_str(),
        e.geofence_id.as_str(),
        e.kind.as_str(),
        e.position.lat,
        e.position.lon,
        millis(e.timestamp),
    ])?;
    Ok(())
}

// ── Store impl ────────────────────────────────────────────────────────────────

impl Store for SqliteStore {
    fn get_asset(&self, id: &AssetId) -> StoreResult<Option<Asset>> {
        let conn = self.conn.lock();
        let asset = conn
            .prepare_cached(&format!("{SELECT_ASSET} WHERE id = ?1"))?
            .query_row(params![id.as_str()], asset_from_row)
            .optional()?;
        Ok(asset)
    }

    fn put_asset(&self, asset: &Asset) -> StoreResult<()> {
        write_asset(&self.conn.lock(), asset)
    }

    fn list_assets(&self, filter: &AssetFilter) -> StoreResult<Vec<Asset>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(&format!(
            "{SELECT_ASSET} WHERE (?1 IS NULL OR status = ?1) AND (?2 IS NULL OR kind = ?2) ORDER BY id"
        ))?;
        let rows = stmt.query_map(
            params![filter.status.map(AssetStatus::as_str), filter.kind.as_ref().map(AssetKind::as_str)],
            asset_from_row,
        )?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    fn append_location(&self, sample: &LocationSample) -> StoreResult<()> {
        write_location(&self.conn.lock(), sample)
    }

    fn list_locations(&self, asset: &AssetId, since: DateTime<Utc>) -> StoreResult<Vec<LocationSample>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(
            "SELECT asset_id, lat, lon, speed_kmh, heading_deg, accuracy_m, timestamp, source \
             FROM locations WHERE asset_id = ?1 AND timestamp >= ?2 \
             ORDER BY timestamp ASC, id ASC",
        )?;
        let rows = stmt.query_map(params![asset.as_str(), millis(since)], location_from_row)?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    fn put_geofence(&self, fence: &Geofence) -> StoreResult<()> {
        self.conn.lock().execute(
            "INSERT OR REPLACE INTO geofences \
             (id, name, center_lat, center_lon, radius_km, shape, active, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                fence.id.as_str(),
                fence.name,
                fence.center.lat,
                fence.center.lon,
                fence.radius_km,
                fence.shape.as_str(),
                fence.active as i64,
                millis(fence.created_at),
            ],
        )?;
        Ok(())
    }

    fn get_geofence(&self, id: &GeofenceId) -> StoreResult<Option<Geofence>> {
        let conn = self.conn.lock();
        let fence = conn
            .prepare_cached(&format!("{SELECT_GEOFENCE} WHERE id = ?1"))?
            .query_row(params![id.as_str()], geofence_from_row)
            .optional()?;
        Ok(fence)
    }

    fn list_active_geofences(&self) -> StoreResult<Vec<Geofence>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(&format!("{SELECT_GEOFENCE} WHERE active = 1 ORDER BY id"))?;
        let rows = stmt.query_map([], geofence_from_row)?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    fn append_geofence_event(&self, event: &GeofenceEvent) -> StoreResult<()> {
        write_event(&self.conn.lock(), event)
    }

    fn list_geofence_events(
        &self,
        asset: Option<&AssetId>,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<GeofenceEvent>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(
            "SELECT asset_id, geofence_id, kind, lat, lon, timestamp FROM geofence_events \
             WHERE timestamp >= ?1 AND (?2 IS NULL OR asset_id = ?2) \
             ORDER BY timestamp DESC, id DESC",
        )?;
        let rows = stmt.query_map(params![millis(since), asset.map(AssetId::as_str)], event_from_row)?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    fn commit_update(
        &self,
        asset:  &Asset,
        sample: &LocationSample,
        events: &[GeofenceEvent],
    ) -> StoreResult<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        write_location(&tx, sample)?;
        write_asset(&tx, asset)?;
        for e in events {
            write_event(&tx, e)?;
        }
        tx.commit()?;
        Ok(())
    }
}
