//! Booking service error types.
//!
//! Every failure kind maps to an HTTP status code via the `IntoResponse`
//! impl and carries a machine-checkable code alongside a human message.
//! All errors are recovered at the service boundary; none is process-fatal.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Booking service error type.
///
/// Maps to HTTP status codes:
/// - AlreadyExists, ConferenceAlreadyStarted, ConfirmationNotOffered,
///   InvalidState: 409 Conflict
/// - ConferenceNotFound, UserNotFound, BookingNotFound: 404 Not Found
/// - InvalidSchedule, Validation: 400 Bad Request
/// - ConfirmationWindowExpired: 410 Gone
/// - Internal: 500 Internal Server Error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Conference not found: {0}")]
    ConferenceNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Conference already started: {0}")]
    ConferenceAlreadyStarted(String),

    #[error("Confirmation not offered")]
    ConfirmationNotOffered,

    #[error("Confirmation window expired")]
    ConfirmationWindowExpired,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error")]
    Internal,
}

impl BookingError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            BookingError::AlreadyExists(_)
            | BookingError::ConferenceAlreadyStarted(_)
            | BookingError::ConfirmationNotOffered
            | BookingError::InvalidState(_) => 409,
            BookingError::ConferenceNotFound(_)
            | BookingError::UserNotFound(_)
            | BookingError::BookingNotFound(_) => 404,
            BookingError::InvalidSchedule(_) | BookingError::Validation(_) => 400,
            BookingError::ConfirmationWindowExpired => 410,
            BookingError::Internal => 500,
        }
    }

    /// Machine-checkable error code carried in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            BookingError::AlreadyExists(_) => "ALREADY_EXISTS",
            BookingError::ConferenceNotFound(_) => "CONFERENCE_NOT_FOUND",
            BookingError::UserNotFound(_) => "USER_NOT_FOUND",
            BookingError::BookingNotFound(_) => "BOOKING_NOT_FOUND",
            BookingError::InvalidSchedule(_) => "INVALID_SCHEDULE",
            BookingError::ConferenceAlreadyStarted(_) => "CONFERENCE_ALREADY_STARTED",
            BookingError::ConfirmationNotOffered => "CONFIRMATION_NOT_OFFERED",
            BookingError::ConfirmationWindowExpired => "CONFIRMATION_WINDOW_EXPIRED",
            BookingError::InvalidState(_) => "INVALID_STATE",
            BookingError::Validation(_) => "VALIDATION_ERROR",
            BookingError::Internal => "INTERNAL_ERROR",
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = match &self {
            BookingError::Internal => {
                // Log server-side, return a generic message to the client.
                tracing::error!(target: "booking.errors", "Internal error surfaced to client");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message,
            },
        };

        (status, Json(error_response)).into_response()
    }
}
