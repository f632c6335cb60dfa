//! Wall-clock abstraction.
//!
//! Confirmation-window expiry is evaluated lazily against the current time
//! rather than through background timers, so every time comparison in the
//! service goes through a single injectable clock source. Production code
//! uses [`SystemClock`]; tests inject a manually advanced clock.

use chrono::{Local, NaiveDateTime};
use std::sync::Arc;

/// Source of "now" for the booking service.
///
/// Timestamps are naive local date-times to match the wire format
/// (`YYYY-MM-DD HH:MM:SS`, no timezone).
pub trait Clock: Send + Sync {
    /// Current wall-clock time.
    fn now(&self) -> NaiveDateTime;
}

/// Shared handle to a clock implementation.
pub type SharedClock = Arc<dyn Clock>;

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
