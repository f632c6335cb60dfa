//! HTTP routes for the booking service.
//!
//! Defines the Axum router and application state.

use crate::clock::SharedClock;
use crate::config::Config;
use crate::handlers;
use crate::services::BookingService;
use crate::store::MemoryStore;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
pub struct AppState {
    /// Service configuration.
    pub config: Config,

    /// The in-memory record store.
    pub store: Arc<MemoryStore>,

    /// Wall-clock source; injectable for tests.
    pub clock: SharedClock,

    /// Booking flow orchestrator.
    pub service: BookingService,
}

impl AppState {
    /// Assemble the application state around a store and clock.
    pub fn new(config: Config, store: Arc<MemoryStore>, clock: SharedClock) -> Self {
        let service = BookingService::new(
            store.clone(),
            clock.clone(),
            config.confirmation_window_seconds,
        );
        Self {
            config,
            store,
            clock,
            service,
        }
    }
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `/v1/health` - Health check
/// - `/v1/users` - User registration
/// - `/v1/conferences` - Conference creation and listing
/// - `/v1/conferences/{name}` - Conference lookup
/// - `/v1/conferences/{name}/bookings` - Booking and per-conference listing
/// - `/v1/bookings/{id}` - Status and cancellation
/// - `/v1/bookings/{id}/confirm` - Waitlist confirmation
/// - TraceLayer for request logging
/// - 30 second request timeout
pub fn build_routes(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        .route("/v1/health", get(handlers::health_check))
        .route("/v1/users", post(handlers::create_user))
        .route(
            "/v1/conferences",
            post(handlers::create_conference).get(handlers::list_conferences),
        )
        .route("/v1/conferences/:name", get(handlers::get_conference))
        .route(
            "/v1/conferences/:name/bookings",
            post(handlers::book_conference).get(handlers::list_conference_bookings),
        )
        .route(
            "/v1/bookings/:id",
            get(handlers::get_booking_status).delete(handlers::cancel_booking),
        )
        .route("/v1/bookings/:id/confirm", post(handlers::confirm_booking))
        .with_state(state);

    // Layer order (bottom-to-top execution):
    // 1. TimeoutLayer - Timeout the request (innermost)
    // 2. TraceLayer - Log request details
    routes
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
}
