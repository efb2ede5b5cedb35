//! Hotel and room handlers
//!
//! Public catalog endpoints plus the admin inventory CRUD.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::hotel::{Hotel, HotelPayload, ListHotelsQuery, Room, RoomPayload, RoomWithHotel};
use crate::middleware::AdminUser;
use crate::models::ApiResponse;
use crate::state::AppState;

// ===== Public catalog =====

/// List hotels, optionally filtered by a search term
pub async fn list_hotels(
    State(app_state): State<AppState>,
    Query(query): Query<ListHotelsQuery>,
) -> ApiResult<Json<ApiResponse<Vec<Hotel>>>> {
    let hotels = app_state.hotel_service.list_hotels(query).await?;

    Ok(Json(ApiResponse::ok(hotels)))
}

/// Get a single hotel
pub async fn get_hotel(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Hotel>>> {
    let hotel = app_state
        .hotel_service
        .get_hotel(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Hotel {} not found", id)))?;

    Ok(Json(ApiResponse::ok(hotel)))
}

/// List a hotel's rooms, cheapest first
pub async fn list_hotel_rooms(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<Room>>>> {
    // 404 for an unknown hotel rather than an empty list
    app_state
        .hotel_service
        .get_hotel(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Hotel {} not found", id)))?;

    let rooms = app_state.hotel_service.list_rooms_for_hotel(&id).await?;

    Ok(Json(ApiResponse::ok(rooms)))
}

// ===== Admin hotel CRUD =====

/// Create a hotel (admin)
pub async fn create_hotel(
    AdminUser(_admin): AdminUser,
    State(app_state): State<AppState>,
    Json(payload): Json<HotelPayload>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Hotel>>)> {
    payload.validate()?;

    let hotel = app_state.hotel_service.create_hotel(payload).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(hotel))))
}

/// Update a hotel (admin)
pub async fn update_hotel(
    AdminUser(_admin): AdminUser,
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<HotelPayload>,
) -> ApiResult<Json<ApiResponse<Hotel>>> {
    payload.validate()?;

    let hotel = app_state
        .hotel_service
        .update_hotel(&id, payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Hotel {} not found", id)))?;

    Ok(Json(ApiResponse::ok(hotel)))
}

/// Delete a hotel and its rooms (admin)
pub async fn delete_hotel(
    AdminUser(_admin): AdminUser,
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = app_state.hotel_service.delete_hotel(&id).await?;

    if !deleted {
        return Err(ApiError::NotFound(format!("Hotel {} not found", id)));
    }

    Ok(StatusCode::NO_CONTENT)
}

// ===== Admin room CRUD =====

/// List all rooms with their hotels (admin)
pub async fn list_rooms(
    AdminUser(_admin): AdminUser,
    State(app_state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<RoomWithHotel>>>> {
    let rooms = app_state.hotel_service.list_rooms().await?;

    Ok(Json(ApiResponse::ok(rooms)))
}

/// Create a room under an existing hotel (admin)
pub async fn create_room(
    AdminUser(_admin): AdminUser,
    State(app_state): State<AppState>,
    Json(payload): Json<RoomPayload>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Room>>)> {
    payload.validate()?;

    // Distinguish a missing hotel from other storage failures
    app_state
        .hotel_service
        .get_hotel(&payload.hotel_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Hotel {} not found", payload.hotel_id)))?;

    let room = app_state.hotel_service.create_room(payload).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(room))))
}

/// Update a room (admin)
pub async fn update_room(
    AdminUser(_admin): AdminUser,
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RoomPayload>,
) -> ApiResult<Json<ApiResponse<Room>>> {
    payload.validate()?;

    let room = app_state
        .hotel_service
        .update_room(&id, payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Room {} not found", id)))?;

    Ok(Json(ApiResponse::ok(room)))
}

/// Delete a room (admin)
pub async fn delete_room(
    AdminUser(_admin): AdminUser,
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = app_state.hotel_service.delete_room(&id).await?;

    if !deleted {
        return Err(ApiError::NotFound(format!("Room {} not found", id)));
    }

    Ok(StatusCode::NO_CONTENT)
}
