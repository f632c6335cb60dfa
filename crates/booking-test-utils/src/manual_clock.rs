//! Manually advanced clock.
//!
//! Confirmation-window expiry is driven entirely by the injected clock, so
//! tests advance time explicitly instead of sleeping.

use booking_service::clock::Clock;
use booking_service::models::timestamp;
use chrono::{Duration, NaiveDateTime};
use std::sync::{Arc, Mutex};

/// A clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    /// Create a clock pinned at `start`, given in the wire timestamp format
    /// (`YYYY-MM-DD HH:MM:SS`). Panics on a malformed literal — test setup
    /// should fail loudly.
    pub fn starting_at(start: &str) -> Arc<Self> {
        let now = NaiveDateTime::parse_from_str(start, timestamp::FORMAT)
            .expect("test clock start must use the wire timestamp format");
        Arc::new(Self {
            now: Mutex::new(now),
        })
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let mut now = self.lock();
        *now = *now + delta;
    }

    /// Pin the clock to an absolute time.
    pub fn set(&self, to: NaiveDateTime) {
        *self.lock() = to;
    }

    /// The clock's current reading.
    pub fn current(&self) -> NaiveDateTime {
        *self.lock()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NaiveDateTime> {
        self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.current()
    }
}
