//! `ft-core` — foundational types for the `fleet_tracker` engine.
//!
//! This crate is a dependency of every other `ft-*` crate.  It has no `ft-*`
//! dependencies and keeps its external ones small (`chrono`, `serde_json`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`ids`]        | `AssetId`, `GeofenceId`                                   |
//! | [`geo`]        | `GeoPoint`, haversine distance, initial bearing           |
//! | [`asset`]      | `Asset`, `AssetKind`, `AssetStatus`, `AssetFilter`        |
//! | [`location`]   | `LocationSample`, `LocationSource`, `LocationReport`      |
//! | [`geofence`]   | `Geofence`, `GeofenceShape`, `GeofenceEvent`, `Containment` |
//! | [`time`]       | `Clock` trait, `SystemClock`, `ManualClock`               |
//! | [`config`]     | `TrackerConfig`                                           |
//! | [`error`]      | `GeoError`, `GeoResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod asset;
pub mod config;
pub mod error;
pub mod geo;
pub mod geofence;
pub mod ids;
pub mod location;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use asset::{Asset, AssetFilter, AssetKind, AssetStatus};
pub use config::TrackerConfig;
pub use error::{GeoError, GeoResult};
pub use geo::{EARTH_RADIUS_KM, GeoPoint, bearing_deg, distance_km};
pub use geofence::{Containment, Geofence, GeofenceEvent, GeofenceEventKind, GeofenceShape};
pub use ids::{AssetId, GeofenceId};
pub use location::{LocationReport, LocationSample, LocationSource};
pub use time::{Clock, ManualClock, SystemClock};
