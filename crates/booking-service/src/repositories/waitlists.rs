//! Per-conference waitlist queues.
//!
//! FIFO of pending booking ids; insertion order is arrival order. An id
//! appears at most once and is removed on cancel or when popped for a seat
//! offer.

use crate::errors::BookingError;
use crate::models::WaitlistEntry;
use crate::store::MemoryStore;
use std::collections::VecDeque;
use tracing::instrument;
use uuid::Uuid;

/// Repository for waitlist queues.
pub struct WaitlistQueue;

impl WaitlistQueue {
    /// Append a booking id to the tail of a conference's queue, creating
    /// the queue record on first use.
    ///
    /// Fails with `InvalidState` if the id is already queued.
    #[instrument(skip(store), fields(conference = %conference, booking_id = %booking_id))]
    pub async fn append(
        store: &MemoryStore,
        conference: &str,
        booking_id: Uuid,
    ) -> Result<(), BookingError> {
        let updated = store
            .waitlists
            .try_update(conference, |entry| {
                if entry.booking_queue.contains(&booking_id) {
                    return Err(BookingError::InvalidState(format!(
                        "booking '{}' is already queued",
                        booking_id
                    )));
                }
                entry.booking_queue.push_back(booking_id);
                Ok(())
            })
            .await?;

        if updated.is_some() {
            return Ok(());
        }

        let entry = WaitlistEntry {
            conference: conference.to_string(),
            booking_queue: VecDeque::from([booking_id]),
        };
        store
            .waitlists
            .create(conference, entry)
            .await
            // Only reachable if the queue record appeared concurrently,
            // which per-conference serialization rules out.
            .map_err(|_| BookingError::Internal)?;
        Ok(())
    }

    /// Pop the head of a conference's queue, if any.
    #[instrument(skip(store), fields(conference = %conference))]
    pub async fn pop_front(
        store: &MemoryStore,
        conference: &str,
    ) -> Result<Option<Uuid>, BookingError> {
        let mut popped = None;
        store
            .waitlists
            .update(conference, |entry| {
                popped = entry.booking_queue.pop_front();
            })
            .await;
        Ok(popped)
    }

    /// Remove a booking id from a conference's queue. Returns whether the
    /// id was present.
    #[instrument(skip(store), fields(conference = %conference, booking_id = %booking_id))]
    pub async fn remove(
        store: &MemoryStore,
        conference: &str,
        booking_id: Uuid,
    ) -> Result<bool, BookingError> {
        let mut removed = false;
        store
            .waitlists
            .update(conference, |entry| {
                let before = entry.booking_queue.len();
                entry.booking_queue.retain(|id| *id != booking_id);
                removed = entry.booking_queue.len() != before;
            })
            .await;
        Ok(removed)
    }

    /// Zero-based position of a booking id in a conference's queue, or
    /// `None` if the id is not queued.
    pub async fn position(
        store: &MemoryStore,
        conference: &str,
        booking_id: Uuid,
    ) -> Option<usize> {
        store
            .waitlists
            .get(conference)
            .await
            .and_then(|entry| entry.booking_queue.iter().position(|id| *id == booking_id))
    }
}
