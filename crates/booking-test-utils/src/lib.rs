//! # Booking Test Utilities
//!
//! Shared test utilities for the booking service.
//!
//! This crate provides:
//! - `ManualClock` for deterministic confirmation-window expiry tests
//! - Router/state harness and request builders for integration tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use booking_test_utils::*;
//! use tower::ServiceExt;
//!
//! #[tokio::test]
//! async fn test_example() {
//!     let harness = TestHarness::new();
//!     let response = harness
//!         .router()
//!         .oneshot(get_request("/v1/health"))
//!         .await
//!         .unwrap();
//!     assert_eq!(response.status(), 200);
//! }
//! ```

pub mod harness;
pub mod manual_clock;

// Re-export commonly used items
pub use harness::*;
pub use manual_clock::ManualClock;
