//! Repository layer for the booking service.
//!
//! Thin typed layers over the record store, following the
//! Handler -> Service -> Repository architecture. Each component owns one
//! entity type: the conference registry owns the seat counter, the booking
//! ledger owns status transitions, the waitlist queue owns FIFO order, and
//! the window tracker owns outstanding seat offers.
//!
//! Repositories provide per-record atomicity only; the service layer
//! serializes multi-record flows behind per-conference locks.

pub mod bookings;
pub mod conferences;
pub mod users;
pub mod waitlists;
pub mod windows;

pub use bookings::BookingLedger;
pub use conferences::ConferenceRegistry;
pub use users::UserRegistry;
pub use waitlists::WaitlistQueue;
pub use windows::ConfirmationWindowTracker;
