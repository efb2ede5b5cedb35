//! API handlers for the Staynest backend

mod auth;
mod booking;
mod dashboard;
mod hotel;
mod user;

pub use auth::*;
pub use booking::*;
pub use dashboard::*;
pub use hotel::*;
pub use user::*;
