//! Idle detection report for a single asset.

use chrono::{DateTime, TimeDelta, Utc};

use ft_core::{Asset, AssetId, LocationSample};

use crate::{MovementResult, classify};

/// Why an asset was (or was not) classified idle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum IdleReason {
    /// No samples fell inside the window.  Carries the time since the asset
    /// was last seen.
    NoRecentReports { since_last_seen: TimeDelta },
    /// Samples exist but the path length is under the threshold.
    Stationary,
    /// Path length reached the threshold.
    Moving,
}

/// Outcome of an idle check.
#[derive(Clone, Debug, PartialEq)]
pub struct IdleReport {
    pub asset_id:     AssetId,
    pub idle:         bool,
    pub reason:       IdleReason,
    pub total_km:     f64,
    pub span:         TimeDelta,
    pub points:       usize,
    pub threshold_km: f64,
}

/// Build an [`IdleReport`] for `asset` from the samples in its window.
///
/// `window` must already be restricted to the look-back period and sorted
/// ascending by timestamp.
pub fn assess_idle(
    asset:        &Asset,
    window:       &[LocationSample],
    threshold_km: f64,
    now:          DateTime<Utc>,
) -> MovementResult<IdleReport> {
    let report = match classify(window, threshold_km)? {
        None => IdleReport {
            asset_id:     asset.id.clone(),
            idle:         true,
            reason:       IdleReason::NoRecentReports {
                since_last_seen: (now - asset.last_seen).max(TimeDelta::zero()),
            },
            total_km:     0.0,
            span:         TimeDelta::zero(),
            points:       0,
            threshold_km,
        },
        Some(m) => IdleReport {
            asset_id:     asset.id.clone(),
            idle:         m.idle,
            reason:       if m.idle { IdleReason::Stationary } else { IdleReason::Moving },
            total_km:     m.total_km,
            span:         m.span,
            points:       m.points,
            threshold_km: m.threshold_km,
        },
    };
    Ok(report)
}
