//! Booking handlers
//!
//! User-facing reservation endpoints and the admin booking table.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::booking::{
    Booking, BookingWithDetails, CreateBookingRequest, ListBookingsQuery, SetBookingStatusRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::middleware::{AdminUser, AuthenticatedUser};
use crate::models::ApiResponse;
use crate::services::analytics::{count_trips, TripCounts};
use crate::state::AppState;

/// A user's bookings with their timeframe breakdown
#[derive(Debug, Serialize)]
pub struct MyBookingsResponse {
    pub bookings: Vec<BookingWithDetails>,
    pub trips: TripCounts,
}

/// Create a booking for the authenticated user
pub async fn create_booking(
    user: AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Booking>>)> {
    let today = Utc::now().date_naive();
    request.validate(today).map_err(ApiError::BadRequest)?;

    let booking = app_state
        .booking_service
        .create_booking(user.user_id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(booking))))
}

/// List the authenticated user's bookings, newest first
pub async fn list_my_bookings(
    user: AuthenticatedUser,
    State(app_state): State<AppState>,
    Query(query): Query<ListBookingsQuery>,
) -> ApiResult<Json<ApiResponse<MyBookingsResponse>>> {
    let bookings = app_state
        .booking_service
        .list_for_user(user.user_id, query)
        .await?;

    let trips = count_trips(&bookings, Utc::now().date_naive());

    Ok(Json(ApiResponse::ok(MyBookingsResponse { bookings, trips })))
}

/// Cancel one of the authenticated user's bookings
pub async fn cancel_my_booking(
    user: AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Booking>>> {
    let booking = app_state
        .booking_service
        .cancel_own_booking(id, user.user_id)
        .await?;

    Ok(Json(ApiResponse::ok(booking)))
}

// ===== Admin =====

/// List all bookings with guest details (admin)
pub async fn list_all_bookings(
    AdminUser(_admin): AdminUser,
    State(app_state): State<AppState>,
    Query(query): Query<ListBookingsQuery>,
) -> ApiResult<Json<ApiResponse<Vec<BookingWithDetails>>>> {
    let bookings = app_state.booking_service.list_all(query).await?;

    Ok(Json(ApiResponse::ok(bookings)))
}

/// Set a booking's status in either direction (admin)
pub async fn set_booking_status(
    AdminUser(_admin): AdminUser,
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetBookingStatusRequest>,
) -> ApiResult<Json<ApiResponse<Booking>>> {
    let booking = app_state
        .booking_service
        .set_booking_status(id, request.status)
        .await?;

    Ok(Json(ApiResponse::ok(booking)))
}
