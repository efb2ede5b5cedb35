//! Booking domain module
//!
//! Models, persistence seam and lifecycle service for reservations.

mod model;
mod service;
mod store;

pub use model::*;
pub use service::{compute_stay_price, BookingError, BookingService};
pub use store::{BookingStore, MockBookingStore, PgBookingStore};
