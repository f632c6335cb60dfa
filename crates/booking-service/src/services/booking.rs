//! Booking orchestration.
//!
//! `BookingService` composes the conference registry, booking ledger,
//! waitlist queue, and confirmation window tracker into the four booking
//! flows (book, cancel, confirm, status). Each flow runs under the
//! per-conference lock, so the multi-record mutation is atomic from any
//! caller's perspective: the seat counter can never go negative and no
//! booking id is double-enqueued or double-popped.
//!
//! Window expiry is evaluated lazily against the injected clock on
//! confirm/status; there is no background timer.

use crate::clock::SharedClock;
use crate::errors::BookingError;
use crate::models::{timestamp, Booking, BookingStatus};
use crate::repositories::{
    BookingLedger, ConferenceRegistry, ConfirmationWindowTracker, UserRegistry, WaitlistQueue,
};
use crate::services::locks::ConferenceLocks;
use crate::store::MemoryStore;
use chrono::Duration;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Outcome of a booking attempt.
///
/// Running out of seats is not an error: the waitlisted outcome is a
/// distinct success variant carrying the created booking, which the caller
/// uses to track status.
#[derive(Debug, Clone)]
pub enum BookingOutcome {
    /// A seat was held; the booking is confirmed.
    Confirmed(Booking),

    /// No seats were left; the booking joined the conference waitlist.
    Waitlisted(Booking),
}

impl BookingOutcome {
    /// The created booking, whichever way the attempt went.
    pub fn booking(&self) -> &Booking {
        match self {
            BookingOutcome::Confirmed(booking) | BookingOutcome::Waitlisted(booking) => booking,
        }
    }
}

/// Booking status plus the waitlist attachment.
///
/// For a waitlisted booking at most one attachment is populated: the time
/// left on a pending seat offer, or the queue position while still queued.
/// A lapsed offer (popped from the queue, window expired) has neither.
#[derive(Debug, Clone)]
pub struct BookingStatusView {
    /// The booking record.
    pub booking: Booking,

    /// Seconds left to confirm a pending seat offer.
    pub time_left_to_confirm_seconds: Option<i64>,

    /// Zero-based position in the conference waitlist.
    pub queue_position: Option<usize>,
}

/// Orchestrator for the booking flows.
pub struct BookingService {
    store: Arc<MemoryStore>,
    clock: SharedClock,
    locks: ConferenceLocks,
    confirmation_window: Duration,
}

impl BookingService {
    /// Build a service over `store`, telling time through `clock`.
    pub fn new(store: Arc<MemoryStore>, clock: SharedClock, confirmation_window_seconds: u64) -> Self {
        let seconds = i64::try_from(confirmation_window_seconds).unwrap_or(i64::MAX);
        Self {
            store,
            clock,
            locks: ConferenceLocks::new(),
            confirmation_window: Duration::seconds(seconds),
        }
    }

    /// Book a seat in `conference_name` for `user_id`.
    ///
    /// With a seat available the booking is created confirmed and the seat
    /// counter decremented; with none it is created waitlisted and queued
    /// at the tail. Booking a conference that has already started fails.
    #[instrument(skip(self), fields(conference = %conference_name, user_id = %user_id))]
    pub async fn book(
        &self,
        conference_name: &str,
        user_id: &str,
    ) -> Result<BookingOutcome, BookingError> {
        let _guard = self.locks.acquire(conference_name).await;

        let conference = ConferenceRegistry::get(&self.store, conference_name).await?;
        UserRegistry::get(&self.store, user_id).await?;

        let now = self.clock.now();
        if now >= conference.timing.start_ts {
            return Err(BookingError::ConferenceAlreadyStarted(format!(
                "conference '{}' started at {}",
                conference_name,
                conference.timing.start_ts.format(timestamp::FORMAT)
            )));
        }

        if conference.available_slots < 1 {
            let booking = BookingLedger::create(
                &self.store,
                Booking {
                    booking_id: Uuid::new_v4(),
                    user_id: user_id.to_string(),
                    conference: conference_name.to_string(),
                    status: BookingStatus::Waitlisted,
                    created_at: now,
                },
            )
            .await?;
            WaitlistQueue::append(&self.store, conference_name, booking.booking_id).await?;

            info!(
                target: "booking.service",
                booking_id = %booking.booking_id,
                conference = %conference_name,
                "No seats left; booking waitlisted"
            );
            return Ok(BookingOutcome::Waitlisted(booking));
        }

        let booking = BookingLedger::create(
            &self.store,
            Booking {
                booking_id: Uuid::new_v4(),
                user_id: user_id.to_string(),
                conference: conference_name.to_string(),
                status: BookingStatus::Confirmed,
                created_at: now,
            },
        )
        .await?;
        ConferenceRegistry::adjust_slots(&self.store, conference_name, -1).await?;

        info!(
            target: "booking.service",
            booking_id = %booking.booking_id,
            conference = %conference_name,
            "Booking confirmed"
        );
        Ok(BookingOutcome::Confirmed(booking))
    }

    /// Cancel a booking.
    ///
    /// Cancelling a confirmed booking frees its seat and, if the waitlist
    /// is non-empty, offers the seat to the queue head by opening a
    /// confirmation window stamped now. Cancelling a waitlisted booking
    /// removes it from the queue (and lapses any outstanding offer).
    /// Cancelling twice is rejected.
    #[instrument(skip(self), fields(booking_id = %booking_id))]
    pub async fn cancel(&self, booking_id: Uuid) -> Result<Booking, BookingError> {
        // A booking's conference never changes, so the lock key can come
        // from an unlocked read; the status is re-read under the lock.
        let booking = BookingLedger::get(&self.store, booking_id).await?;
        let _guard = self.locks.acquire(&booking.conference).await;
        let booking = BookingLedger::get(&self.store, booking_id).await?;

        match booking.status {
            BookingStatus::Cancelled => Err(BookingError::InvalidState(format!(
                "booking '{}' is already cancelled",
                booking_id
            ))),
            BookingStatus::Confirmed => {
                let cancelled =
                    BookingLedger::set_status(&self.store, booking_id, BookingStatus::Cancelled)
                        .await?;
                ConferenceRegistry::adjust_slots(&self.store, &booking.conference, 1).await?;

                if let Some(head) = WaitlistQueue::pop_front(&self.store, &booking.conference).await?
                {
                    let offered_at = self.clock.now();
                    ConfirmationWindowTracker::open(&self.store, head, offered_at).await?;
                    info!(
                        target: "booking.service",
                        cancelled = %booking_id,
                        offered_to = %head,
                        conference = %booking.conference,
                        "Freed seat offered to waitlist head"
                    );
                }
                Ok(cancelled)
            }
            BookingStatus::Waitlisted => {
                WaitlistQueue::remove(&self.store, &booking.conference, booking_id).await?;
                // An outstanding seat offer lapses with the cancellation.
                ConfirmationWindowTracker::close(&self.store, booking_id).await;
                let cancelled =
                    BookingLedger::set_status(&self.store, booking_id, BookingStatus::Cancelled)
                        .await?;
                Ok(cancelled)
            }
        }
    }

    /// Confirm a waitlisted booking that has been offered a seat.
    ///
    /// The offer must be outstanding and within the confirmation window.
    /// An expired window is deleted and the offer is terminal: the booking
    /// stays waitlisted and is not re-offered.
    #[instrument(skip(self), fields(booking_id = %booking_id))]
    pub async fn confirm(&self, booking_id: Uuid) -> Result<Booking, BookingError> {
        let booking = BookingLedger::get(&self.store, booking_id).await?;
        let _guard = self.locks.acquire(&booking.conference).await;
        let booking = BookingLedger::get(&self.store, booking_id).await?;

        match booking.status {
            BookingStatus::Confirmed => Err(BookingError::InvalidState(format!(
                "booking '{}' is already confirmed",
                booking_id
            ))),
            BookingStatus::Cancelled => Err(BookingError::InvalidState(format!(
                "booking '{}' is cancelled",
                booking_id
            ))),
            BookingStatus::Waitlisted => {
                let Some(window) = ConfirmationWindowTracker::get(&self.store, booking_id).await
                else {
                    return Err(BookingError::ConfirmationNotOffered);
                };

                let now = self.clock.now();
                if now - window.offered_at > self.confirmation_window {
                    ConfirmationWindowTracker::close(&self.store, booking_id).await;
                    info!(
                        target: "booking.service",
                        booking_id = %booking_id,
                        offered_at = %window.offered_at.format(timestamp::FORMAT),
                        "Confirmation window expired"
                    );
                    return Err(BookingError::ConfirmationWindowExpired);
                }

                // The freed seat may have been taken by a fresh booking in
                // the meantime; the offer stands until it expires.
                ConferenceRegistry::adjust_slots(&self.store, &booking.conference, -1).await?;
                let confirmed =
                    BookingLedger::set_status(&self.store, booking_id, BookingStatus::Confirmed)
                        .await?;
                ConfirmationWindowTracker::close(&self.store, booking_id).await;

                info!(
                    target: "booking.service",
                    booking_id = %booking_id,
                    conference = %booking.conference,
                    "Waitlisted booking confirmed"
                );
                Ok(confirmed)
            }
        }
    }

    /// Report a booking's status.
    ///
    /// A waitlisted booking with a pending offer reports the time left to
    /// confirm; one still queued reports its queue position. Discovering an
    /// expired window deletes it and fails the query.
    #[instrument(skip(self), fields(booking_id = %booking_id))]
    pub async fn status(&self, booking_id: Uuid) -> Result<BookingStatusView, BookingError> {
        let booking = BookingLedger::get(&self.store, booking_id).await?;
        let _guard = self.locks.acquire(&booking.conference).await;
        let booking = BookingLedger::get(&self.store, booking_id).await?;

        if booking.status != BookingStatus::Waitlisted {
            return Ok(BookingStatusView {
                booking,
                time_left_to_confirm_seconds: None,
                queue_position: None,
            });
        }

        if let Some(window) = ConfirmationWindowTracker::get(&self.store, booking_id).await {
            let elapsed = self.clock.now() - window.offered_at;
            if elapsed > self.confirmation_window {
                ConfirmationWindowTracker::close(&self.store, booking_id).await;
                return Err(BookingError::ConfirmationWindowExpired);
            }

            return Ok(BookingStatusView {
                time_left_to_confirm_seconds: Some((self.confirmation_window - elapsed).num_seconds()),
                queue_position: None,
                booking,
            });
        }

        let queue_position =
            WaitlistQueue::position(&self.store, &booking.conference, booking_id).await;
        Ok(BookingStatusView {
            booking,
            time_left_to_confirm_seconds: None,
            queue_position,
        })
    }
}
