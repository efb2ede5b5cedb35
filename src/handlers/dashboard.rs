//! Admin dashboard handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::booking::{BookingWithDetails, ListBookingsQuery};
use crate::error::ApiResult;
use crate::middleware::AdminUser;
use crate::models::ApiResponse;
use crate::services::analytics::{
    monthly_histogram, summarize_by_status, top_n, MonthlyBucket,
};
use crate::state::AppState;

const RECENT_BOOKINGS: usize = 5;
const TOP_HOTELS: usize = 5;

/// A hotel ranked by booking volume
#[derive(Debug, Serialize)]
pub struct TopHotel {
    pub hotel_name: String,
    pub bookings: usize,
}

/// Aggregated dashboard figures
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_users: i64,
    pub total_hotels: i64,
    pub total_bookings: i64,
    pub confirmed_bookings: usize,
    pub cancelled_bookings: usize,
    /// Revenue from confirmed bookings only
    pub total_revenue: i64,
    pub monthly_bookings: Vec<MonthlyBucket>,
    pub top_hotels: Vec<TopHotel>,
    pub recent_bookings: Vec<BookingWithDetails>,
}

/// Assemble the admin dashboard (admin)
pub async fn dashboard(
    AdminUser(_admin): AdminUser,
    State(app_state): State<AppState>,
) -> ApiResult<Json<ApiResponse<DashboardResponse>>> {
    let total_users = app_state.profile_service.count_users().await?;
    let total_hotels = app_state.hotel_service.count_hotels().await?;
    let total_bookings = app_state.booking_service.count().await?;

    // Newest first, so recent bookings are a prefix
    let bookings = app_state
        .booking_service
        .list_all(ListBookingsQuery::default())
        .await?;

    let summary = summarize_by_status(&bookings);
    let monthly_bookings = monthly_histogram(&bookings);
    let top_hotels = top_n(bookings.iter().map(|b| b.hotel_name.clone()), TOP_HOTELS)
        .into_iter()
        .map(|(hotel_name, count)| TopHotel {
            hotel_name,
            bookings: count,
        })
        .collect();

    let recent_bookings = bookings.into_iter().take(RECENT_BOOKINGS).collect();

    Ok(Json(ApiResponse::ok(DashboardResponse {
        total_users,
        total_hotels,
        total_bookings,
        confirmed_bookings: summary.confirmed,
        cancelled_bookings: summary.cancelled,
        total_revenue: summary.confirmed_revenue,
        monthly_bookings,
        top_hotels,
        recent_bookings,
    })))
}
