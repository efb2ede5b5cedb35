//! Hotel and room models for the Staynest backend

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

/// Hotel model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Hotel {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub location: String,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
}

/// Room model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Room {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub room_type: String,
    pub price: i64, // Nightly price in whole currency units
    pub capacity: i32,
    pub quantity: i32,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Room with its owning hotel joined in (for the admin room table)
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct RoomWithHotel {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub room_type: String,
    pub price: i64,
    pub capacity: i32,
    pub quantity: i32,
    pub description: String,
    pub created_at: DateTime<Utc>,

    pub hotel_name: String,
    pub hotel_location: String,
}

/// Request DTO for creating or updating a hotel
#[derive(Debug, Deserialize, Validate)]
pub struct HotelPayload {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub description: String,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[validate(range(min = 0.0, max = 5.0, message = "rating must be between 0 and 5"))]
    pub rating: f64,
}

/// Request DTO for creating or updating a room
#[derive(Debug, Deserialize, Validate)]
pub struct RoomPayload {
    pub hotel_id: Uuid,
    #[validate(length(min = 1, message = "room type is required"))]
    pub room_type: String,
    #[validate(range(min = 0, message = "price must be non-negative"))]
    pub price: i64,
    #[validate(range(min = 1, message = "capacity must be positive"))]
    pub capacity: i32,
    #[validate(range(min = 1, message = "quantity must be positive"))]
    pub quantity: i32,
    #[serde(default)]
    pub description: String,
}

/// Query parameters for the public hotel listing
#[derive(Debug, Deserialize, Default)]
pub struct ListHotelsQuery {
    /// Case-insensitive match against hotel name or location
    pub search: Option<String>,
}
