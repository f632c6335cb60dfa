//! Booking handlers.
//!
//! - `POST /v1/conferences/{name}/bookings` - Book a seat
//! - `GET /v1/bookings/{id}` - Booking status
//! - `DELETE /v1/bookings/{id}` - Cancel a booking
//! - `POST /v1/bookings/{id}/confirm` - Confirm a waitlisted booking
//!
//! Booking a full conference is not an error: the booking is created
//! waitlisted and the response is 202 Accepted carrying the booking id, so
//! the caller can track its status.

use crate::errors::BookingError;
use crate::models::{
    BookConferenceRequest, BookConferenceResponse, Booking, BookingStatusResponse, MessageResponse,
};
use crate::routes::AppState;
use crate::services::{BookingOutcome, BookingStatusView};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

fn status_response(view: BookingStatusView) -> BookingStatusResponse {
    BookingStatusResponse {
        booking_id: view.booking.booking_id,
        user_id: view.booking.user_id,
        conference: view.booking.conference,
        status: view.booking.status,
        created_at: view.booking.created_at,
        time_left_to_confirm_seconds: view.time_left_to_confirm_seconds,
        queue_position: view.queue_position,
    }
}

/// Handler for `POST /v1/conferences/{name}/bookings`.
///
/// Books a seat for a user. With no seats left the booking is created
/// waitlisted and queued; that outcome is a success, distinguished by the
/// 202 status and the `WAITLISTED` status in the body.
///
/// # Response
///
/// - 201 Created: booking confirmed
/// - 202 Accepted: no seats left, booking waitlisted
/// - 400 Bad Request: invalid fields
/// - 404 Not Found: unknown conference or user
/// - 409 Conflict: conference already started
#[instrument(skip(state, request), fields(conference = %name))]
pub async fn book_conference(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(request): Json<BookConferenceRequest>,
) -> Result<(StatusCode, Json<BookConferenceResponse>), BookingError> {
    request
        .validate()
        .map_err(|e| BookingError::Validation(e.to_string()))?;

    let outcome = state.service.book(&name, request.user_id.trim()).await?;

    let (status_code, message) = match &outcome {
        BookingOutcome::Confirmed(_) => (StatusCode::CREATED, "booking confirmed".to_string()),
        BookingOutcome::Waitlisted(booking) => (
            StatusCode::ACCEPTED,
            format!(
                "no seats left in the conference; added to the waitlist. use booking id {} to track status",
                booking.booking_id
            ),
        ),
    };

    let booking = outcome.booking();
    Ok((
        status_code,
        Json(BookConferenceResponse {
            booking_id: booking.booking_id,
            status: booking.status,
            message,
        }),
    ))
}

/// Handler for `GET /v1/bookings/{id}`.
///
/// Reports booking status. A waitlisted booking carries the time left to
/// confirm a pending seat offer, or its queue position while still queued.
///
/// # Response
///
/// - 200 OK: booking status
/// - 404 Not Found: unknown booking
/// - 410 Gone: the pending seat offer has expired
#[instrument(skip(state), fields(booking_id = %booking_id))]
pub async fn get_booking_status(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingStatusResponse>, BookingError> {
    let view = state.service.status(booking_id).await?;
    Ok(Json(status_response(view)))
}

/// Handler for `DELETE /v1/bookings/{id}`.
///
/// Cancels a booking. A confirmed booking frees its seat and offers it to
/// the waitlist head; a waitlisted booking leaves the queue. Cancelling an
/// already-cancelled booking is rejected.
///
/// # Response
///
/// - 200 OK: confirmation message
/// - 404 Not Found: unknown booking
/// - 409 Conflict: already cancelled
#[instrument(skip(state), fields(booking_id = %booking_id))]
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, BookingError> {
    let cancelled = state.service.cancel(booking_id).await?;
    Ok(Json(MessageResponse {
        message: format!("cancelled booking {}", cancelled.booking_id),
    }))
}

/// Handler for `POST /v1/bookings/{id}/confirm`.
///
/// Confirms a waitlisted booking holding a pending seat offer.
///
/// # Response
///
/// - 200 OK: updated booking
/// - 404 Not Found: unknown booking
/// - 409 Conflict: not waitlisted, or no seat offer outstanding
/// - 410 Gone: the seat offer has expired
#[instrument(skip(state), fields(booking_id = %booking_id))]
pub async fn confirm_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<Booking>, BookingError> {
    let confirmed = state.service.confirm(booking_id).await?;
    Ok(Json(confirmed))
}
