//! Confirmation window tracker.
//!
//! One record per outstanding seat offer, keyed by booking id and stamped
//! with the offer time. Windows are opened when a freed seat is offered to
//! the waitlist head and closed on confirmation or expiry; an id is never
//! re-offered.

use crate::errors::BookingError;
use crate::models::ConfirmationWindow;
use crate::store::MemoryStore;
use chrono::NaiveDateTime;
use tracing::instrument;
use uuid::Uuid;

/// Repository for confirmation windows.
pub struct ConfirmationWindowTracker;

impl ConfirmationWindowTracker {
    /// Open a window for `booking_id`, stamped `offered_at`.
    #[instrument(skip(store), fields(booking_id = %booking_id))]
    pub async fn open(
        store: &MemoryStore,
        booking_id: Uuid,
        offered_at: NaiveDateTime,
    ) -> Result<ConfirmationWindow, BookingError> {
        let window = ConfirmationWindow {
            booking_id,
            offered_at,
        };
        store
            .windows
            .create(&booking_id.to_string(), window)
            .await
            .map_err(|_| {
                BookingError::InvalidState(format!(
                    "booking '{}' already holds a seat offer",
                    booking_id
                ))
            })
    }

    /// Fetch the outstanding window for `booking_id`, if any.
    pub async fn get(store: &MemoryStore, booking_id: Uuid) -> Option<ConfirmationWindow> {
        store.windows.get(&booking_id.to_string()).await
    }

    /// Close the window for `booking_id`. Returns whether one was open.
    #[instrument(skip(store), fields(booking_id = %booking_id))]
    pub async fn close(store: &MemoryStore, booking_id: Uuid) -> bool {
        store.windows.delete(&booking_id.to_string()).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::models::timestamp;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, timestamp::FORMAT).unwrap()
    }

    #[tokio::test]
    async fn test_open_and_get() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        let offered_at = ts("2026-09-01 10:00:00");

        ConfirmationWindowTracker::open(&store, id, offered_at)
            .await
            .unwrap();

        let window = ConfirmationWindowTracker::get(&store, id).await.unwrap();
        assert_eq!(window.offered_at, offered_at);
    }

    #[tokio::test]
    async fn test_open_twice_fails() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();

        ConfirmationWindowTracker::open(&store, id, ts("2026-09-01 10:00:00"))
            .await
            .unwrap();
        let err = ConfirmationWindowTracker::open(&store, id, ts("2026-09-01 11:00:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_close() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();

        ConfirmationWindowTracker::open(&store, id, ts("2026-09-01 10:00:00"))
            .await
            .unwrap();

        assert!(ConfirmationWindowTracker::close(&store, id).await);
        assert!(!ConfirmationWindowTracker::close(&store, id).await);
        assert!(ConfirmationWindowTracker::get(&store, id).await.is_none());
    }
}
