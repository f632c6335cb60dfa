//! Booking service models.
//!
//! Domain entities (conference, user, booking, waitlist entry, confirmation
//! window) plus the API request/response types. Request types reject unknown
//! fields and carry their own field validation; schedule validation lives in
//! the conference registry.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// Maximum conference duration in hours.
pub const MAX_CONFERENCE_DURATION_HOURS: i64 = 12;

/// Maximum number of topics on a conference.
pub const MAX_CONFERENCE_TOPICS: usize = 10;

/// Maximum number of interest topics on a user.
pub const MAX_USER_TOPICS: usize = 50;

/// Wire format for timestamps: naive local date-time, no timezone.
///
/// Consumers treat these as opaque strings and parse with exactly this
/// format.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// The exchange format for all timestamps.
    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Serialize a timestamp in the exchange format.
    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.format(FORMAT).to_string())
    }

    /// Deserialize a timestamp from the exchange format.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Conference timing: start and end of the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Timing {
    /// Start of the conference.
    #[serde(with = "timestamp")]
    pub start_ts: NaiveDateTime,

    /// End of the conference.
    #[serde(with = "timestamp")]
    pub end_ts: NaiveDateTime,
}

/// A conference definition.
///
/// `available_slots` is the authoritative seat counter; it is mutated only
/// by the booking/cancellation/confirmation flows and can never go below
/// zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conference {
    /// Unique conference name (primary key).
    pub name: String,

    /// Venue or city.
    pub location: String,

    /// Conference topics (at most [`MAX_CONFERENCE_TOPICS`]).
    pub topics: Vec<String>,

    /// Start/end timestamps.
    pub timing: Timing,

    /// Remaining seats.
    pub available_slots: u32,

    /// When the conference record was created.
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
}

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user id (primary key).
    pub user_id: String,

    /// Topics the user is interested in.
    pub interested_topics: Vec<String>,

    /// When the user record was created.
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
}

/// Booking lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Seat held by this booking.
    Confirmed,

    /// Queued for a seat; not holding one.
    Waitlisted,

    /// Booking released; terminal.
    Cancelled,
}

impl BookingStatus {
    /// String form as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Waitlisted => "WAITLISTED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }
}

/// A booking of one seat (or a place in the waitlist) for one user.
///
/// Booking ids are generated v4 UUIDs and are never reused. The referenced
/// conference never changes for the lifetime of the booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Unique booking id (primary key).
    pub booking_id: Uuid,

    /// The user who booked.
    pub user_id: String,

    /// Name of the booked conference.
    pub conference: String,

    /// Current lifecycle state.
    pub status: BookingStatus,

    /// When the booking was created.
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
}

/// Per-conference FIFO waitlist.
///
/// Insertion order is arrival order; an id appears at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistEntry {
    /// The conference this queue belongs to (primary key).
    pub conference: String,

    /// Queued booking ids, front = next in line.
    pub booking_queue: VecDeque<Uuid>,
}

/// An outstanding seat offer to a waitlisted booking.
///
/// Exists only between the offer (a confirmed booking was cancelled and
/// this booking was at the head of the queue) and its confirmation or
/// expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationWindow {
    /// The booking the seat was offered to (primary key).
    pub booking_id: Uuid,

    /// When the seat was offered.
    #[serde(with = "timestamp")]
    pub offered_at: NaiveDateTime,
}

// ============================================================================
// API Request Models
// ============================================================================

/// Request to register a user.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    /// Unique user id.
    pub user_id: String,

    /// Topics the user is interested in.
    pub interested_topics: Vec<String>,
}

impl CreateUserRequest {
    /// Validate field shapes.
    ///
    /// # Errors
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.user_id.trim().is_empty() {
            return Err("user_id must not be empty");
        }

        if self.interested_topics.is_empty() {
            return Err("at least one interested topic is required");
        }

        if self.interested_topics.len() > MAX_USER_TOPICS {
            return Err("at most 50 interested topics are allowed");
        }

        if self.interested_topics.iter().any(|t| t.trim().is_empty()) {
            return Err("topics must not be empty");
        }

        Ok(())
    }
}

/// Request to create a conference.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateConferenceRequest {
    /// Unique conference name.
    pub name: String,

    /// Venue or city.
    pub location: String,

    /// Conference topics.
    pub topics: Vec<String>,

    /// Start/end timestamps.
    pub timing: Timing,

    /// Initial seat capacity.
    pub available_slots: u32,
}

impl CreateConferenceRequest {
    /// Validate field shapes. Timing is validated by the conference
    /// registry, which owns the schedule invariants.
    ///
    /// # Errors
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty");
        }

        if self.location.trim().is_empty() {
            return Err("location must not be empty");
        }

        if self.topics.is_empty() {
            return Err("at least one topic is required");
        }

        if self.topics.len() > MAX_CONFERENCE_TOPICS {
            return Err("at most 10 topics are allowed");
        }

        if self.topics.iter().any(|t| t.trim().is_empty()) {
            return Err("topics must not be empty");
        }

        Ok(())
    }
}

/// Request to book a seat in a conference.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookConferenceRequest {
    /// The user booking the seat.
    pub user_id: String,
}

impl BookConferenceRequest {
    /// Validate field shapes.
    ///
    /// # Errors
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.user_id.trim().is_empty() {
            return Err("user_id must not be empty");
        }
        Ok(())
    }
}

/// Query parameters for listing conferences.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListConferencesQuery {
    /// Only conferences covering this topic.
    pub topic: Option<String>,

    /// Maximum number of records to return.
    pub limit: Option<usize>,

    /// Number of records to skip.
    pub offset: Option<usize>,
}

// ============================================================================
// API Response Models
// ============================================================================

/// Response to a booking attempt.
///
/// The waitlisted outcome is a success (the booking exists and is
/// queryable), distinguished from the confirmed outcome by `status` and the
/// HTTP status code (201 vs 202).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookConferenceResponse {
    /// Id of the created booking; use it to track status.
    pub booking_id: Uuid,

    /// `CONFIRMED` or `WAITLISTED`.
    pub status: BookingStatus,

    /// Human-readable outcome description.
    pub message: String,
}

/// Booking status report.
///
/// For waitlisted bookings exactly one of the attachments is populated:
/// `time_left_to_confirm_seconds` while a seat offer is pending,
/// `queue_position` while still queued. A lapsed offer has neither.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingStatusResponse {
    /// Booking id.
    pub booking_id: Uuid,

    /// The user who booked.
    pub user_id: String,

    /// Name of the booked conference.
    pub conference: String,

    /// Current lifecycle state.
    pub status: BookingStatus,

    /// When the booking was created.
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,

    /// Seconds left to confirm a pending seat offer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_left_to_confirm_seconds: Option<i64>,

    /// Zero-based position in the conference waitlist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_position: Option<usize>,
}

/// Plain confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service health status ("healthy").
    pub status: String,
}
