//! Admin route definitions
//!
//! Every handler behind these routes takes the `AdminUser` extractor.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::*;
use crate::state::AppState;

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/hotels", post(create_hotel))
        .route("/api/admin/hotels/:id", put(update_hotel))
        .route("/api/admin/hotels/:id", delete(delete_hotel))
        .route("/api/admin/rooms", get(list_rooms))
        .route("/api/admin/rooms", post(create_room))
        .route("/api/admin/rooms/:id", put(update_room))
        .route("/api/admin/rooms/:id", delete(delete_room))
        .route("/api/admin/bookings", get(list_all_bookings))
        .route("/api/admin/bookings/:id/status", put(set_booking_status))
        .route("/api/admin/users", get(list_users))
        .route("/api/admin/users/:id/role", put(update_user_role))
        .route("/api/admin/dashboard", get(dashboard))
}
