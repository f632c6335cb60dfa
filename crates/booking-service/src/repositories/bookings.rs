//! Booking ledger.
//!
//! Owns booking records and their status transitions. Booking ids are
//! generated v4 UUIDs and never reused; the ledger only ever appends
//! records and flips statuses.

use crate::errors::BookingError;
use crate::models::{Booking, BookingStatus};
use crate::store::MemoryStore;
use tracing::instrument;
use uuid::Uuid;

/// Repository for booking records.
pub struct BookingLedger;

impl BookingLedger {
    /// Append a new booking to the ledger.
    #[instrument(skip_all, fields(booking_id = %booking.booking_id, conference = %booking.conference))]
    pub async fn create(store: &MemoryStore, booking: Booking) -> Result<Booking, BookingError> {
        store
            .bookings
            .create(&booking.booking_id.to_string(), booking)
            .await
            // v4 collisions are not a practical concern; treat one as fatal.
            .map_err(|_| BookingError::Internal)
    }

    /// Fetch a booking by id.
    pub async fn get(store: &MemoryStore, booking_id: Uuid) -> Result<Booking, BookingError> {
        store
            .bookings
            .get(&booking_id.to_string())
            .await
            .ok_or_else(|| {
                BookingError::BookingNotFound(format!("booking '{}' does not exist", booking_id))
            })
    }

    /// Flip a booking to `status`, returning the updated record.
    #[instrument(skip(store), fields(booking_id = %booking_id, status = status.as_str()))]
    pub async fn set_status(
        store: &MemoryStore,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, BookingError> {
        store
            .bookings
            .update(&booking_id.to_string(), |booking| booking.status = status)
            .await
            .ok_or_else(|| {
                BookingError::BookingNotFound(format!("booking '{}' does not exist", booking_id))
            })
    }

    /// All bookings for a conference, ordered by creation time.
    pub async fn list_for_conference(store: &MemoryStore, conference: &str) -> Vec<Booking> {
        let mut bookings = store
            .bookings
            .list(|booking| booking.conference == conference, None, 0)
            .await;
        bookings.sort_by_key(|booking| booking.created_at);
        bookings
    }
}
