//! Route definitions for the Staynest API

mod admin;
mod auth;
mod booking;
mod hotel;

pub use admin::admin_routes;
pub use auth::auth_routes;
pub use booking::booking_routes;
pub use hotel::hotel_routes;
