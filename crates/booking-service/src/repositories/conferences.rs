//! Conference registry.
//!
//! Owns conference definitions and the authoritative `available_slots`
//! counter. Schedule invariants (`start_ts <= end_ts`, duration at most 12
//! hours) are enforced at creation; the counter can never go below zero.

use crate::errors::BookingError;
use crate::models::{Conference, MAX_CONFERENCE_DURATION_HOURS};
use crate::store::MemoryStore;
use chrono::Duration;
use tracing::instrument;

/// Repository for conference records.
pub struct ConferenceRegistry;

impl ConferenceRegistry {
    /// Register a new conference.
    ///
    /// Fails with `AlreadyExists` if the name is taken and with
    /// `InvalidSchedule` if the timing is inconsistent or longer than 12
    /// hours. The stored record is returned on success.
    #[instrument(skip_all, fields(conference = %conference.name))]
    pub async fn create(
        store: &MemoryStore,
        conference: Conference,
    ) -> Result<Conference, BookingError> {
        let timing = conference.timing;
        if timing.start_ts > timing.end_ts {
            return Err(BookingError::InvalidSchedule(
                "start_ts must not be after end_ts".to_string(),
            ));
        }

        let duration = timing.end_ts - timing.start_ts;
        if duration > Duration::hours(MAX_CONFERENCE_DURATION_HOURS) {
            return Err(BookingError::InvalidSchedule(format!(
                "conference duration must not exceed {} hours",
                MAX_CONFERENCE_DURATION_HOURS
            )));
        }

        let name = conference.name.clone();
        store
            .conferences
            .create(&name, conference)
            .await
            .map_err(|_| {
                BookingError::AlreadyExists(format!("conference '{}' already exists", name))
            })
    }

    /// Fetch a conference by name.
    pub async fn get(store: &MemoryStore, name: &str) -> Result<Conference, BookingError> {
        store.conferences.get(name).await.ok_or_else(|| {
            BookingError::ConferenceNotFound(format!("conference '{}' does not exist", name))
        })
    }

    /// Atomically add `delta` (which may be negative) to the seat counter.
    ///
    /// Fails with `InvalidState` if the result would be negative; the
    /// counter is left unchanged in that case.
    #[instrument(skip(store), fields(conference = %name, delta))]
    pub async fn adjust_slots(
        store: &MemoryStore,
        name: &str,
        delta: i64,
    ) -> Result<Conference, BookingError> {
        let updated = store
            .conferences
            .try_update(name, |conference| {
                let adjusted = i64::from(conference.available_slots) + delta;
                if adjusted < 0 {
                    return Err(BookingError::InvalidState(format!(
                        "conference '{}' has no seats left to take",
                        name
                    )));
                }
                conference.available_slots =
                    u32::try_from(adjusted).map_err(|_| BookingError::Internal)?;
                Ok(())
            })
            .await?;

        updated.ok_or_else(|| {
            BookingError::ConferenceNotFound(format!("conference '{}' does not exist", name))
        })
    }

    /// List conferences, optionally restricted to one topic, ordered by
    /// name.
    pub async fn list(
        store: &MemoryStore,
        topic: Option<&str>,
        limit: Option<usize>,
        offset: usize,
    ) -> Vec<Conference> {
        store
            .conferences
            .list(
                |conference| match topic {
                    Some(topic) => conference.topics.iter().any(|t| t == topic),
                    None => true,
                },
                limit,
                offset,
            )
            .await
    }
}
