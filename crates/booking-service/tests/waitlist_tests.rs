//! Waitlist and confirmation window integration tests.
//!
//! Drives the full offer lifecycle through the HTTP surface: cancellation
//! opens a window for the queue head, status reports the time left, and
//! expiry is discovered lazily on confirm/status.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use anyhow::Result;
use axum::http::StatusCode;
use booking_test_utils::{
    delete_request, get_request, post_json, post_request, user_payload, TestHarness,
};
use chrono::Duration;
use serde_json::{json, Value};

async fn create_conference(harness: &TestHarness, name: &str, slots: u32) {
    let (status, _) = harness
        .request_json(post_json(
            "/v1/conferences",
            &harness.future_conference(name, slots),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn create_user(harness: &TestHarness, user_id: &str) {
    let (status, _) = harness
        .request_json(post_json("/v1/users", &user_payload(user_id)))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn book(harness: &TestHarness, conference: &str, user_id: &str) -> String {
    let (_, body) = harness
        .request_json(post_json(
            &format!("/v1/conferences/{conference}/bookings"),
            &json!({ "user_id": user_id }),
        ))
        .await;
    body["booking_id"].as_str().unwrap().to_string()
}

async fn booking_status(harness: &TestHarness, booking_id: &str) -> (StatusCode, Value) {
    harness
        .request_json(get_request(&format!("/v1/bookings/{booking_id}")))
        .await
}

async fn available_slots(harness: &TestHarness, conference: &str) -> u64 {
    let (_, body) = harness
        .request_json(get_request(&format!("/v1/conferences/{conference}")))
        .await;
    body["available_slots"].as_u64().unwrap()
}

/// One confirmed booking (returned first) and one waitlisted booking
/// (returned second) in a single-seat conference.
async fn seat_and_waitlist(harness: &TestHarness) -> (String, String) {
    create_conference(harness, "RustConf", 1).await;
    create_user(harness, "alice").await;
    create_user(harness, "bob").await;

    let confirmed = book(harness, "RustConf", "alice").await;
    let waitlisted = book(harness, "RustConf", "bob").await;
    (confirmed, waitlisted)
}

#[tokio::test]
async fn test_cancel_confirmed_offers_seat_to_waitlist_head() -> Result<()> {
    let harness = TestHarness::new();
    let (confirmed, waitlisted) = seat_and_waitlist(&harness).await;

    let (status, body) = harness
        .request_json(delete_request(&format!("/v1/bookings/{confirmed}")))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains(&confirmed));

    // The head now holds a full-length confirmation window.
    let (status, body) = booking_status(&harness, &waitlisted).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "WAITLISTED");
    assert_eq!(body["time_left_to_confirm_seconds"], 3600);
    assert!(body.get("queue_position").is_none());

    Ok(())
}

#[tokio::test]
async fn test_offer_lifecycle_through_expiry() -> Result<()> {
    let harness = TestHarness::new();
    let (confirmed, waitlisted) = seat_and_waitlist(&harness).await;

    // Cancel at time T; the window for the head opens at T.
    let (status, _) = harness
        .request_json(delete_request(&format!("/v1/bookings/{confirmed}")))
        .await;
    assert_eq!(status, StatusCode::OK);

    // T+30min: roughly half the window is left.
    harness.clock().advance(Duration::minutes(30));
    let (status, body) = booking_status(&harness, &waitlisted).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["time_left_to_confirm_seconds"], 1800);

    // T+61min: the offer has lapsed.
    harness.clock().advance(Duration::minutes(31));
    let (status, body) = harness
        .request_json(post_request(&format!("/v1/bookings/{waitlisted}/confirm")))
        .await;
    assert_eq!(status, StatusCode::GONE);
    assert_eq!(body["error"]["code"], "CONFIRMATION_WINDOW_EXPIRED");

    // The window was deleted with the failure; there is no re-offer.
    let (status, body) = harness
        .request_json(post_request(&format!("/v1/bookings/{waitlisted}/confirm")))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFIRMATION_NOT_OFFERED");

    // The booking itself stays waitlisted.
    let (status, body) = booking_status(&harness, &waitlisted).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "WAITLISTED");

    Ok(())
}

#[tokio::test]
async fn test_confirm_within_window_takes_the_seat() -> Result<()> {
    let harness = TestHarness::new();
    let (confirmed, waitlisted) = seat_and_waitlist(&harness).await;

    harness
        .request_json(delete_request(&format!("/v1/bookings/{confirmed}")))
        .await;
    assert_eq!(available_slots(&harness, "RustConf").await, 1);

    harness.clock().advance(Duration::minutes(30));
    let (status, body) = harness
        .request_json(post_request(&format!("/v1/bookings/{waitlisted}/confirm")))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "CONFIRMED");
    assert_eq!(available_slots(&harness, "RustConf").await, 0);

    Ok(())
}

#[tokio::test]
async fn test_status_discovers_expiry_and_deletes_window() -> Result<()> {
    let harness = TestHarness::new();
    let (confirmed, waitlisted) = seat_and_waitlist(&harness).await;

    harness
        .request_json(delete_request(&format!("/v1/bookings/{confirmed}")))
        .await;

    harness.clock().advance(Duration::minutes(61));
    let (status, body) = booking_status(&harness, &waitlisted).await;
    assert_eq!(status, StatusCode::GONE);
    assert_eq!(body["error"]["code"], "CONFIRMATION_WINDOW_EXPIRED");

    // A lapsed offer is terminal: no window, no queue position.
    let (status, body) = booking_status(&harness, &waitlisted).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "WAITLISTED");
    assert!(body.get("time_left_to_confirm_seconds").is_none());
    assert!(body.get("queue_position").is_none());

    Ok(())
}

#[tokio::test]
async fn test_cancel_confirmed_with_empty_waitlist_frees_the_seat() -> Result<()> {
    let harness = TestHarness::new();
    create_conference(&harness, "RustConf", 1).await;
    create_user(&harness, "alice").await;
    create_user(&harness, "bob").await;

    let confirmed = book(&harness, "RustConf", "alice").await;
    let (status, _) = harness
        .request_json(delete_request(&format!("/v1/bookings/{confirmed}")))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(available_slots(&harness, "RustConf").await, 1);

    // No window was opened; the seat goes to the next fresh booking.
    let (status, body) = harness
        .request_json(post_json(
            "/v1/conferences/RustConf/bookings",
            &json!({ "user_id": "bob" }),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "CONFIRMED");

    Ok(())
}

#[tokio::test]
async fn test_cancel_waitlisted_removes_from_queue() -> Result<()> {
    let harness = TestHarness::new();
    create_conference(&harness, "RustConf", 0).await;
    for user in ["alice", "bob"] {
        create_user(&harness, user).await;
    }

    let first = book(&harness, "RustConf", "alice").await;
    let second = book(&harness, "RustConf", "bob").await;

    let (status, _) = harness
        .request_json(delete_request(&format!("/v1/bookings/{first}")))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = booking_status(&harness, &first).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "CANCELLED");

    // The second booking moved up to the head.
    let (_, body) = booking_status(&harness, &second).await;
    assert_eq!(body["queue_position"], 0);

    Ok(())
}

#[tokio::test]
async fn test_double_cancel_is_rejected() -> Result<()> {
    let harness = TestHarness::new();
    create_conference(&harness, "RustConf", 1).await;
    create_user(&harness, "alice").await;

    let booking = book(&harness, "RustConf", "alice").await;

    let (status, _) = harness
        .request_json(delete_request(&format!("/v1/bookings/{booking}")))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = harness
        .request_json(delete_request(&format!("/v1/bookings/{booking}")))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "INVALID_STATE");

    // The seat was freed exactly once.
    assert_eq!(available_slots(&harness, "RustConf").await, 1);

    Ok(())
}

#[tokio::test]
async fn test_confirm_without_offer_is_rejected() -> Result<()> {
    let harness = TestHarness::new();
    create_conference(&harness, "RustConf", 0).await;
    create_user(&harness, "alice").await;

    let waitlisted = book(&harness, "RustConf", "alice").await;

    let (status, body) = harness
        .request_json(post_request(&format!("/v1/bookings/{waitlisted}/confirm")))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFIRMATION_NOT_OFFERED");

    Ok(())
}

#[tokio::test]
async fn test_confirm_confirmed_booking_is_rejected() -> Result<()> {
    let harness = TestHarness::new();
    create_conference(&harness, "RustConf", 1).await;
    create_user(&harness, "alice").await;

    let confirmed = book(&harness, "RustConf", "alice").await;

    let (status, body) = harness
        .request_json(post_request(&format!("/v1/bookings/{confirmed}/confirm")))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "INVALID_STATE");

    Ok(())
}

#[tokio::test]
async fn test_custom_window_length_is_honored() -> Result<()> {
    let harness = TestHarness::with_window(60);
    let (confirmed, waitlisted) = seat_and_waitlist(&harness).await;

    harness
        .request_json(delete_request(&format!("/v1/bookings/{confirmed}")))
        .await;

    let (_, body) = booking_status(&harness, &waitlisted).await;
    assert_eq!(body["time_left_to_confirm_seconds"], 60);

    harness.clock().advance(Duration::seconds(61));
    let (status, body) = harness
        .request_json(post_request(&format!("/v1/bookings/{waitlisted}/confirm")))
        .await;
    assert_eq!(status, StatusCode::GONE);
    assert_eq!(body["error"]["code"], "CONFIRMATION_WINDOW_EXPIRED");

    Ok(())
}

#[tokio::test]
async fn test_offer_goes_to_next_head_on_subsequent_cancellation() -> Result<()> {
    let harness = TestHarness::new();
    create_conference(&harness, "RustConf", 2).await;
    for user in ["alice", "bob", "carol", "dave"] {
        create_user(&harness, user).await;
    }

    let seat_a = book(&harness, "RustConf", "alice").await;
    let seat_b = book(&harness, "RustConf", "bob").await;
    let queue_first = book(&harness, "RustConf", "carol").await;
    let queue_second = book(&harness, "RustConf", "dave").await;

    // First cancellation offers to the head of the queue, not the tail.
    harness
        .request_json(delete_request(&format!("/v1/bookings/{seat_a}")))
        .await;
    let (_, body) = booking_status(&harness, &queue_first).await;
    assert_eq!(body["time_left_to_confirm_seconds"], 3600);
    let (_, body) = booking_status(&harness, &queue_second).await;
    assert_eq!(body["queue_position"], 0);

    // Second cancellation offers to the booking that moved up.
    harness
        .request_json(delete_request(&format!("/v1/bookings/{seat_b}")))
        .await;
    let (_, body) = booking_status(&harness, &queue_second).await;
    assert_eq!(body["time_left_to_confirm_seconds"], 3600);

    Ok(())
}
