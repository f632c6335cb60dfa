//! HTTP request handlers for the booking service.

pub mod bookings;
pub mod conferences;
pub mod health;
pub mod users;

pub use bookings::{book_conference, cancel_booking, confirm_booking, get_booking_status};
pub use conferences::{
    create_conference, get_conference, list_conference_bookings, list_conferences,
};
pub use health::health_check;
pub use users::create_user;
