//! Path length and the moving/stationary verdict over a run of samples.

use chrono::TimeDelta;

use ft_core::LocationSample;

use crate::{MovementError, MovementResult};

/// Cumulative path length through `samples` in the order given, km.
///
/// The sum of the `N - 1` pairwise great-circle distances between
/// consecutive samples.  Zero for fewer than two samples.
pub fn trip_distance_km(samples: &[LocationSample]) -> f64 {
    samples
        .windows(2)
        .map(|w| w[0].position.distance_km(w[1].position))
        .sum()
}

/// Movement over one window of samples.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MovementSummary {
    /// `total_km < threshold_km`.
    pub idle:         bool,
    pub total_km:     f64,
    /// Time between the first and last sample actually observed.  This is
    /// shorter than the requested window whenever reports are sparse.
    pub span:         TimeDelta,
    pub points:       usize,
    pub threshold_km: f64,
}

/// Classify `samples` (time-ascending, one asset) against `threshold_km`.
///
/// Returns `Ok(None)` when `samples` is empty; there is nothing to measure
/// and the caller decides how to report that.
pub fn classify(
    samples:      &[LocationSample],
    threshold_km: f64,
) -> MovementResult<Option<MovementSummary>> {
    if !threshold_km.is_finite() || threshold_km < 0.0 {
        return Err(MovementError::InvalidThreshold(threshold_km));
    }
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return Ok(None);
    };

    let total_km = trip_distance_km(samples);
    // Out-of-order arrivals are kept as recorded; never report a negative span.
    let span = (last.timestamp - first.timestamp).max(TimeDelta::zero());

    Ok(Some(MovementSummary {
        idle: total_km < threshold_km,
        total_km,
        span,
        points: samples.len(),
        threshold_km,
    }))
}
