//! Wall-clock source for ingestion timestamps.
//!
//! # Design
//!
//! The tracker stamps every accepted sample with "now" rather than trusting
//! the sender's clock.  Reading "now" goes through the [`Clock`] trait so the
//! windowed logic (idle detection, history cut-offs) can be driven
//! deterministically in tests with [`ManualClock`].
//!
//! All timestamps are `DateTime<Utc>`.  Persistent stores keep them at
//! millisecond precision, so `ManualClock` also works in whole milliseconds.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeDelta, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

// ── SystemClock ───────────────────────────────────────────────────────────────

/// Reads the host's real-time clock.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// ── ManualClock ───────────────────────────────────────────────────────────────

/// A clock that only moves when told to.
///
/// Shared by reference between the tracker and the test driving it; all
/// methods take `&self`.
#[derive(Debug)]
pub struct ManualClock {
    unix_millis: AtomicI64,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { unix_millis: AtomicI64::new(start.timestamp_millis()) }
    }

    /// Move the clock forward (or backward, for a negative delta).
    pub fn advance(&self, by: TimeDelta) {
        self.unix_millis.fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }

    pub fn set(&self, to: DateTime<Utc>) {
        self.unix_millis.store(to.timestamp_millis(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.unix_millis.load(Ordering::SeqCst))
            .unwrap_or_default()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
