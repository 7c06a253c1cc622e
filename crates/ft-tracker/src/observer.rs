//! Observer hooks for accepted samples and geofence transitions.

use ft_core::{GeofenceEvent, LocationSample};

/// Callbacks invoked by [`Tracker::submit_location`][crate::Tracker::submit_location]
/// after a report has been committed.
///
/// Hooks run on the submitting thread while the asset's lock is still held,
/// so for any one asset they are called in commit order.  Keep them short.
/// All methods have default no-op implementations.
///
/// # Example: alert forwarder
///
/// ```rust,ignore
/// struct Alerts(std::sync::mpsc::Sender<GeofenceEvent>);
///
/// impl TrackerObserver for Alerts {
///     fn on_geofence_event(&self, event: &GeofenceEvent) {
///         let _ = self.0.send(event.clone());
///     }
/// }
/// ```
pub trait TrackerObserver: Send + Sync {
    /// Called once per accepted location sample.
    fn on_location(&self, _sample: &LocationSample) {}

    /// Called once per emitted enter/exit event, in evaluation order.
    fn on_geofence_event(&self, _event: &GeofenceEvent) {}
}

/// A [`TrackerObserver`] that does nothing.
pub struct NoopObserver;

impl TrackerObserver for NoopObserver {}
