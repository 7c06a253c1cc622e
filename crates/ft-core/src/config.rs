//! Engine configuration.

use std::time::Duration;

/// Tunables for the tracking engine.
///
/// Every field has a sensible default; construct with
/// `TrackerConfig { lock_shards: 16, ..Default::default() }` to override a
/// subset.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrackerConfig {
    /// Cumulative path length below which an asset counts as idle, km.
    pub idle_threshold_km: f64,

    /// Default trailing window for idle detection.
    pub idle_window: Duration,

    /// Default look-back for history, trip-distance and event queries.
    pub history_window: Duration,

    /// Number of per-asset lock shards.  Updates for assets hashing to
    /// different shards proceed in parallel.  Clamped to at least 1.
    pub lock_shards: usize,

    /// Answer proximity queries through an R-tree built over each snapshot
    /// instead of a linear scan.  Results are identical.
    pub spatial_index: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            idle_threshold_km: 0.1,
            idle_window:       Duration::from_secs(30 * 60),
            history_window:    Duration::from_secs(24 * 60 * 60),
            lock_shards:       64,
            spatial_index:     false,
        }
    }
}
