//! Conference handlers.
//!
//! - `POST /v1/conferences` - Create a conference
//! - `GET /v1/conferences` - List conferences
//! - `GET /v1/conferences/{name}` - Fetch a conference
//! - `GET /v1/conferences/{name}/bookings` - List a conference's bookings

use crate::errors::BookingError;
use crate::models::{Booking, Conference, CreateConferenceRequest, ListConferencesQuery};
use crate::repositories::{BookingLedger, ConferenceRegistry};
use crate::routes::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Handler for `POST /v1/conferences`.
///
/// Creates a conference. The name is the unique id; `available_slots` is
/// the initial seat capacity.
///
/// # Response
///
/// - 201 Created: conference record
/// - 400 Bad Request: invalid fields or schedule (start after end, or
///   duration over 12 hours)
/// - 409 Conflict: name already taken
#[instrument(skip(state, request), fields(conference = %request.name))]
pub async fn create_conference(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateConferenceRequest>,
) -> Result<(StatusCode, Json<Conference>), BookingError> {
    request
        .validate()
        .map_err(|e| BookingError::Validation(e.to_string()))?;

    let conference = ConferenceRegistry::create(
        &state.store,
        Conference {
            name: request.name.trim().to_string(),
            location: request.location.trim().to_string(),
            topics: request.topics,
            timing: request.timing,
            available_slots: request.available_slots,
            created_at: state.clock.now(),
        },
    )
    .await?;

    info!(
        target: "booking.handlers.conferences",
        conference = %conference.name,
        available_slots = conference.available_slots,
        "Conference created"
    );

    Ok((StatusCode::CREATED, Json(conference)))
}

/// Handler for `GET /v1/conferences/{name}`.
///
/// # Response
///
/// - 200 OK: conference record
/// - 404 Not Found: unknown conference
#[instrument(skip(state), fields(conference = %name))]
pub async fn get_conference(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Conference>, BookingError> {
    let conference = ConferenceRegistry::get(&state.store, &name).await?;
    Ok(Json(conference))
}

/// Handler for `GET /v1/conferences`.
///
/// Lists conferences ordered by name; `topic`, `limit` and `offset` query
/// parameters narrow the result.
#[instrument(skip(state, query))]
pub async fn list_conferences(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListConferencesQuery>,
) -> Result<Json<Vec<Conference>>, BookingError> {
    let conferences = ConferenceRegistry::list(
        &state.store,
        query.topic.as_deref(),
        query.limit,
        query.offset.unwrap_or(0),
    )
    .await;
    Ok(Json(conferences))
}

/// Handler for `GET /v1/conferences/{name}/bookings`.
///
/// Lists all bookings for a conference, ordered by creation time.
///
/// # Response
///
/// - 200 OK: booking records
/// - 404 Not Found: unknown conference
#[instrument(skip(state), fields(conference = %name))]
pub async fn list_conference_bookings(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Booking>>, BookingError> {
    // Verify the conference exists before listing.
    ConferenceRegistry::get(&state.store, &name).await?;

    let bookings = BookingLedger::list_for_conference(&state.store, &name).await;
    Ok(Json(bookings))
}
