//! Hotel service layer - inventory management for hotels and rooms

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::hotel::{Hotel, HotelPayload, ListHotelsQuery, Room, RoomPayload, RoomWithHotel};

/// Hotel service for hotel and room inventory
pub struct HotelService {
    db_pool: PgPool,
}

impl HotelService {
    /// Create new hotel service instance
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    // ===== Hotels =====

    /// List hotels, newest first, optionally filtered by name or location
    pub async fn list_hotels(&self, query: ListHotelsQuery) -> Result<Vec<Hotel>> {
        let mut query_builder: sqlx::QueryBuilder<sqlx::Postgres> =
            sqlx::QueryBuilder::new("SELECT * FROM hotels WHERE 1=1");

        if let Some(search) = query.search.filter(|s| !s.trim().is_empty()) {
            let pattern = format!("%{}%", search.trim());
            query_builder.push(" AND (name ILIKE ");
            query_builder.push_bind(pattern.clone());
            query_builder.push(" OR location ILIKE ");
            query_builder.push_bind(pattern);
            query_builder.push(")");
        }

        query_builder.push(" ORDER BY created_at DESC");

        let hotels = query_builder
            .build_query_as::<Hotel>()
            .fetch_all(&self.db_pool)
            .await?;

        Ok(hotels)
    }

    /// Get a single hotel by ID
    pub async fn get_hotel(&self, id: &Uuid) -> Result<Option<Hotel>> {
        let hotel = sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(hotel)
    }

    /// Create a new hotel
    pub async fn create_hotel(&self, payload: HotelPayload) -> Result<Hotel> {
        let hotel = sqlx::query_as::<_, Hotel>(
            r#"
            INSERT INTO hotels (id, name, description, location, images, amenities, rating, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(&payload.location)
        .bind(&payload.images)
        .bind(&payload.amenities)
        .bind(payload.rating)
        .bind(Utc::now())
        .fetch_one(&self.db_pool)
        .await
        .context("Failed to insert hotel")?;

        Ok(hotel)
    }

    /// Update an existing hotel, returning the updated row if it exists
    pub async fn update_hotel(&self, id: &Uuid, payload: HotelPayload) -> Result<Option<Hotel>> {
        let hotel = sqlx::query_as::<_, Hotel>(
            r#"
            UPDATE hotels
            SET name = $1, description = $2, location = $3, images = $4, amenities = $5, rating = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(&payload.location)
        .bind(&payload.images)
        .bind(&payload.amenities)
        .bind(payload.rating)
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(hotel)
    }

    /// Delete a hotel (cascades to its rooms)
    pub async fn delete_hotel(&self, id: &Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM hotels WHERE id = $1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all hotels (for the dashboard)
    pub async fn count_hotels(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM hotels")
            .fetch_one(&self.db_pool)
            .await?;

        Ok(count)
    }

    // ===== Rooms =====

    /// List rooms for one hotel, cheapest first
    pub async fn list_rooms_for_hotel(&self, hotel_id: &Uuid) -> Result<Vec<Room>> {
        let rooms = sqlx::query_as::<_, Room>(
            "SELECT * FROM rooms WHERE hotel_id = $1 ORDER BY price ASC",
        )
        .bind(hotel_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(rooms)
    }

    /// List all rooms joined with their hotel, newest first (admin view)
    pub async fn list_rooms(&self) -> Result<Vec<RoomWithHotel>> {
        let rooms = sqlx::query_as::<_, RoomWithHotel>(
            r#"
            SELECT
                r.*,
                h.name AS hotel_name,
                h.location AS hotel_location
            FROM rooms r
            JOIN hotels h ON r.hotel_id = h.id
            ORDER BY r.created_at DESC
            "#,
        )
        .fetch_all(&self.db_pool)
        .await?;

        Ok(rooms)
    }

    /// Create a new room under an existing hotel
    pub async fn create_room(&self, payload: RoomPayload) -> Result<Room> {
        // Owning hotel must exist; FK violation would be opaque to callers
        self.get_hotel(&payload.hotel_id)
            .await?
            .context("Hotel not found for room")?;

        let room = sqlx::query_as::<_, Room>(
            r#"
            INSERT INTO rooms (id, hotel_id, room_type, price, capacity, quantity, description, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(payload.hotel_id)
        .bind(&payload.room_type)
        .bind(payload.price)
        .bind(payload.capacity)
        .bind(payload.quantity)
        .bind(&payload.description)
        .bind(Utc::now())
        .fetch_one(&self.db_pool)
        .await
        .context("Failed to insert room")?;

        Ok(room)
    }

    /// Update an existing room, returning the updated row if it exists
    pub async fn update_room(&self, id: &Uuid, payload: RoomPayload) -> Result<Option<Room>> {
        let room = sqlx::query_as::<_, Room>(
            r#"
            UPDATE rooms
            SET hotel_id = $1, room_type = $2, price = $3, capacity = $4, quantity = $5, description = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(payload.hotel_id)
        .bind(&payload.room_type)
        .bind(payload.price)
        .bind(payload.capacity)
        .bind(payload.quantity)
        .bind(&payload.description)
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(room)
    }

    /// Delete a room
    pub async fn delete_room(&self, id: &Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
