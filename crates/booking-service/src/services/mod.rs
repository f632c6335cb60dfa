//! Service layer for the booking service.
//!
//! `BookingService` orchestrates the repositories into the booking flows;
//! `ConferenceLocks` provides the per-conference mutual exclusion those
//! flows run under.

pub mod booking;
pub mod locks;

pub use booking::{BookingOutcome, BookingService, BookingStatusView};
pub use locks::ConferenceLocks;
