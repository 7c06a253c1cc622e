//! `ft-tracker` — the tracking coordinator.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`tracker`]  | `Tracker<S, C>` — ingestion, queries, zone management        |
//! | [`locks`]    | `AssetLocks` — sharded per-asset read/write locks            |
//! | [`observer`] | `TrackerObserver` hooks, `NoopObserver`                      |
//! | [`status`]   | `FleetStatus`, `AssetSummary`, `GeofenceCheck`               |
//! | [`error`]    | `TrackError`, `TrackResult<T>`                               |
//!
//! # Ingestion (`Tracker::submit_location`)
//!
//! 1. Validate the coordinate (nothing is read or written on failure).
//! 2. Take the asset's shard write lock.
//! 3. Read the asset's current state.  This is the "previous" position.
//! 4. Derive heading if none was reported, stamp the sample with the clock.
//! 5. Evaluate every active geofence for `previous → new`.
//! 6. Commit sample + asset + events in one `Store::commit_update`.
//! 7. Notify the observer, release the lock.
//!
//! Steps 3–7 run under the same guard, so two reports for one asset can never
//! both observe the same "previous" position.  Reports for assets in
//! different shards proceed in parallel.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `fx-hash`  | FxHash instead of SipHash for shard selection.            |
//! | `parallel` | Proximity scans run on the Rayon pool.                    |
//! | `sqlite`   | Re-enables `ft-store`'s SQLite backend.                   |

pub mod error;
pub mod locks;
pub mod observer;
pub mod status;
pub mod tracker;


pub use error::{TrackError, TrackResult};
pub use locks::AssetLocks;
pub use observer::{NoopObserver, TrackerObserver};
pub use status::{AssetSummary, FleetStatus, GeofenceCheck};
pub use tracker::Tracker;
