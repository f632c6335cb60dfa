//! User handlers.
//!
//! - `POST /v1/users` - Register a user

use crate::errors::BookingError;
use crate::models::{CreateUserRequest, User};
use crate::repositories::UserRegistry;
use crate::routes::AppState;
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::{info, instrument};

/// Handler for `POST /v1/users`.
///
/// Registers a user. Users are immutable once created.
///
/// # Response
///
/// - 201 Created: user record
/// - 400 Bad Request: invalid fields
/// - 409 Conflict: user id already taken
#[instrument(skip(state, request))]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), BookingError> {
    request
        .validate()
        .map_err(|e| BookingError::Validation(e.to_string()))?;

    let user = UserRegistry::create(
        &state.store,
        User {
            user_id: request.user_id.trim().to_string(),
            interested_topics: request.interested_topics,
            created_at: state.clock.now(),
        },
    )
    .await?;

    info!(
        target: "booking.handlers.users",
        user_id = %user.user_id,
        "User registered"
    );

    Ok((StatusCode::CREATED, Json(user)))
}
