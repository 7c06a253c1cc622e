//! `ft-geofence` — circular zones and the transitions across their edges.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`evaluator`] | `evaluate`, `transition`, `validate_geofence`              |
//! | [`loader`]    | `load_geofences_csv`, `load_geofences_reader`              |
//! | [`error`]     | `GeofenceError`, `GeofenceResult<T>`                       |
//!
//! # Transition rule
//!
//! For each active zone with center `c` and radius `r`:
//!
//! | `d(prev, c) <= r` | `d(new, c) <= r` | Event   |
//! |-------------------|------------------|---------|
//! | no                | yes              | `Enter` |
//! | yes               | no               | `Exit`  |
//! | same              | same             | —       |
//!
//! At most one event per zone per update.  `Dwell` is never produced.

pub mod error;
pub mod evaluator;
pub mod loader;

#[cfg(test)]
mod tests;

pub use error::{GeofenceError, GeofenceResult};
pub use evaluator::{evaluate, transition, validate_geofence};
pub use loader::{load_geofences_csv, load_geofences_reader};
