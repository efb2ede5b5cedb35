//! Hotel domain module
//!
//! Contains models and service for hotel and room inventory.

mod model;
mod service;

pub use model::*;
pub use service::HotelService;
