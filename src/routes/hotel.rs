//! Public hotel catalog route definitions

use axum::{routing::get, Router};

use crate::handlers::*;
use crate::state::AppState;

pub fn hotel_routes() -> Router<AppState> {
    Router::new()
        .route("/api/hotels", get(list_hotels))
        .route("/api/hotels/:id", get(get_hotel))
        .route("/api/hotels/:id/rooms", get(list_hotel_rooms))
}
