//! Booking Service Library
//!
//! Conference seat booking with waitlisting: users reserve seats in
//! capacity-bounded conferences, are queued when capacity is exhausted, and
//! are offered time-limited confirmation windows as seats free up.
//!
//! # Architecture
//!
//! The service follows the Handler -> Service -> Repository pattern:
//!
//! ```text
//! routes/mod.rs -> handlers/*.rs -> services/*.rs -> repositories/*.rs -> store
//! ```
//!
//! All mutating flows that reference the same conference serialize behind a
//! per-conference lock; flows on different conferences run in parallel.
//! Confirmation-window expiry is evaluated lazily against an injectable
//! clock — there is no background timer.
//!
//! # Modules
//!
//! - `clock` - Injectable wall-clock source
//! - `config` - Service configuration from environment
//! - `errors` - Error types with HTTP status code mapping
//! - `handlers` - HTTP request handlers
//! - `models` - Domain entities and API types
//! - `repositories` - Typed layers over the record store
//! - `routes` - Axum router setup
//! - `services` - Booking orchestration and per-conference locking
//! - `store` - In-memory record store

pub mod clock;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod store;
