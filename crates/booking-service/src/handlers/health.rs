//! Health check handler.

use crate::models::HealthResponse;
use axum::Json;
use tracing::instrument;

/// Handler for `GET /v1/health`.
///
/// The service has no external dependencies to probe; a response is the
/// liveness signal.
#[instrument(name = "booking.health.check")]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
