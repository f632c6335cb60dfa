//! Router harness and request builders for integration tests.
//!
//! Builds the full application router over a fresh in-memory store and a
//! [`ManualClock`], so tests drive the real HTTP surface and control time
//! explicitly.

use crate::manual_clock::ManualClock;
use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use booking_service::config::Config;
use booking_service::models::timestamp;
use booking_service::routes::{build_routes, AppState};
use booking_service::store::MemoryStore;
use chrono::Duration;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Where every harness clock starts.
pub const TEST_CLOCK_START: &str = "2026-08-15 10:00:00";

/// A booking service wired for tests: fresh store, manual clock, real
/// router.
pub struct TestHarness {
    state: Arc<AppState>,
    clock: Arc<ManualClock>,
}

impl TestHarness {
    /// Harness with the default 1-hour confirmation window.
    pub fn new() -> Self {
        Self::with_window(booking_service::config::DEFAULT_CONFIRMATION_WINDOW_SECONDS)
    }

    /// Harness with a custom confirmation window.
    pub fn with_window(confirmation_window_seconds: u64) -> Self {
        let clock = ManualClock::starting_at(TEST_CLOCK_START);
        let config = Config {
            bind_address: "127.0.0.1:0".to_string(),
            confirmation_window_seconds,
        };
        let state = Arc::new(AppState::new(
            config,
            Arc::new(MemoryStore::new()),
            clock.clone(),
        ));
        Self { state, clock }
    }

    /// The manual clock driving this harness.
    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// The shared application state.
    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    /// A fresh router over the shared state.
    pub fn router(&self) -> Router {
        build_routes(self.state.clone())
    }

    /// Drive one request through the router.
    pub async fn request(&self, request: Request<Body>) -> Response<Body> {
        self.router()
            .oneshot(request)
            .await
            .expect("router must produce a response")
    }

    /// Drive one request and decode the JSON body.
    pub async fn request_json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.request(request).await;
        let status = response.status();
        let body = read_json(response).await;
        (status, body)
    }

    /// Conference payload starting a day after the harness clock.
    pub fn future_conference(&self, name: &str, available_slots: u32) -> Value {
        let start = self.clock.current() + Duration::days(1);
        let end = start + Duration::hours(8);
        conference_payload(
            name,
            available_slots,
            &start.format(timestamp::FORMAT).to_string(),
            &end.format(timestamp::FORMAT).to_string(),
        )
    }

    /// Conference payload that started a day before the harness clock.
    pub fn past_conference(&self, name: &str, available_slots: u32) -> Value {
        let start = self.clock.current() - Duration::days(1);
        let end = start + Duration::hours(8);
        conference_payload(
            name,
            available_slots,
            &start.format(timestamp::FORMAT).to_string(),
            &end.format(timestamp::FORMAT).to_string(),
        )
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Conference creation payload.
pub fn conference_payload(name: &str, available_slots: u32, start: &str, end: &str) -> Value {
    json!({
        "name": name,
        "location": "Berlin",
        "topics": ["rust", "distributed-systems"],
        "timing": { "start_ts": start, "end_ts": end },
        "available_slots": available_slots,
    })
}

/// User creation payload.
pub fn user_payload(user_id: &str) -> Value {
    json!({
        "user_id": user_id,
        "interested_topics": ["rust"],
    })
}

/// GET request with an empty body.
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request construction must succeed")
}

/// DELETE request with an empty body.
pub fn delete_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .expect("request construction must succeed")
}

/// POST request with an empty body.
pub fn post_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .expect("request construction must succeed")
}

/// POST request with a JSON body.
pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request construction must succeed")
}

/// Decode a response body as JSON.
pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body must be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body must be valid JSON")
}
