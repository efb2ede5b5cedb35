//! Booking persistence seam
//!
//! The lifecycle service talks to storage only through [`BookingStore`], so
//! tests can substitute an in-memory fake for the PostgreSQL implementation.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::booking::{
    Booking, BookingStatus, BookingStatusChange, BookingWithDetails, CancelActor,
    ListBookingsQuery, NewBooking,
};
use crate::hotel::Room;

#[mockall::automock]
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Fetch a room (for pricing and hotel ownership checks)
    async fn fetch_room(&self, room_id: Uuid) -> Result<Option<Room>>;

    /// Persist a new booking and return the stored row
    async fn insert(&self, booking: NewBooking) -> Result<Booking>;

    /// Fetch a single booking
    async fn find(&self, id: Uuid) -> Result<Option<Booking>>;

    /// Bookings of one user with hotel/room details, newest first
    async fn list_by_user(
        &self,
        user_id: Uuid,
        query: ListBookingsQuery,
    ) -> Result<Vec<BookingWithDetails>>;

    /// All bookings with hotel/room/guest details, newest first
    async fn list_all(&self, query: ListBookingsQuery) -> Result<Vec<BookingWithDetails>>;

    /// Apply a status transition guarded on the current status.
    ///
    /// Returns the updated row, or `None` when the booking was not in the
    /// status the transition starts from (including when it does not exist).
    async fn update_status(
        &self,
        id: Uuid,
        change: BookingStatusChange,
    ) -> Result<Option<Booking>>;

    /// Count all bookings (for the dashboard)
    async fn count(&self) -> Result<i64>;
}

/// PostgreSQL-backed booking store
pub struct PgBookingStore {
    db_pool: PgPool,
}

impl PgBookingStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

const DETAILS_SELECT: &str = r#"
    SELECT
        b.*,
        h.name AS hotel_name,
        h.location AS hotel_location,
        r.room_type AS room_type,
        r.price AS room_price,
        p.full_name AS guest_name
    FROM bookings b
    JOIN hotels h ON b.hotel_id = h.id
    JOIN rooms r ON b.room_id = r.id
    JOIN profiles p ON b.user_id = p.id
"#;

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn fetch_room(&self, room_id: Uuid) -> Result<Option<Room>> {
        let room = sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(room_id)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(room)
    }

    async fn insert(&self, booking: NewBooking) -> Result<Booking> {
        let row = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (
                id, user_id, hotel_id, room_id, check_in, check_out,
                total_price, status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(booking.user_id)
        .bind(booking.hotel_id)
        .bind(booking.room_id)
        .bind(booking.check_in)
        .bind(booking.check_out)
        .bind(booking.total_price)
        .bind(BookingStatus::Confirmed)
        .bind(Utc::now())
        .fetch_one(&self.db_pool)
        .await?;

        Ok(row)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(booking)
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        query: ListBookingsQuery,
    ) -> Result<Vec<BookingWithDetails>> {
        let mut query_builder: sqlx::QueryBuilder<sqlx::Postgres> =
            sqlx::QueryBuilder::new(DETAILS_SELECT);
        query_builder.push(" WHERE b.user_id = ");
        query_builder.push_bind(user_id);

        if let Some(status) = query.status {
            query_builder.push(" AND b.status = ");
            query_builder.push_bind(status);
        }

        query_builder.push(" ORDER BY b.created_at DESC");

        let bookings = query_builder
            .build_query_as::<BookingWithDetails>()
            .fetch_all(&self.db_pool)
            .await?;

        Ok(bookings)
    }

    async fn list_all(&self, query: ListBookingsQuery) -> Result<Vec<BookingWithDetails>> {
        let mut query_builder: sqlx::QueryBuilder<sqlx::Postgres> =
            sqlx::QueryBuilder::new(DETAILS_SELECT);
        query_builder.push(" WHERE 1=1");

        if let Some(status) = query.status {
            query_builder.push(" AND b.status = ");
            query_builder.push_bind(status);
        }
        if let Some(search) = query.search.filter(|s| !s.trim().is_empty()) {
            let pattern = format!("%{}%", search.trim());
            query_builder.push(" AND (h.name ILIKE ");
            query_builder.push_bind(pattern.clone());
            query_builder.push(" OR r.room_type ILIKE ");
            query_builder.push_bind(pattern.clone());
            query_builder.push(" OR p.full_name ILIKE ");
            query_builder.push_bind(pattern);
            query_builder.push(")");
        }

        query_builder.push(" ORDER BY b.created_at DESC");

        let bookings = query_builder
            .build_query_as::<BookingWithDetails>()
            .fetch_all(&self.db_pool)
            .await?;

        Ok(bookings)
    }

    async fn update_status(
        &self,
        id: Uuid,
        change: BookingStatusChange,
    ) -> Result<Option<Booking>> {
        // The WHERE clause guards the transition so concurrent duplicate
        // requests cannot overwrite the first cancellation's attribution.
        let booking = match change {
            BookingStatusChange::Cancel { actor, at } => {
                sqlx::query_as::<_, Booking>(
                    r#"
                    UPDATE bookings
                    SET status = $1, cancelled_at = $2, cancelled_by = $3
                    WHERE id = $4 AND status = $5
                    RETURNING *
                    "#,
                )
                .bind(BookingStatus::Cancelled)
                .bind(at)
                .bind(actor)
                .bind(id)
                .bind(BookingStatus::Confirmed)
                .fetch_optional(&self.db_pool)
                .await?
            }
            BookingStatusChange::Reconfirm => {
                sqlx::query_as::<_, Booking>(
                    r#"
                    UPDATE bookings
                    SET status = $1, cancelled_at = NULL, cancelled_by = NULL
                    WHERE id = $2 AND status = $3
                    RETURNING *
                    "#,
                )
                .bind(BookingStatus::Confirmed)
                .bind(id)
                .bind(BookingStatus::Cancelled)
                .fetch_optional(&self.db_pool)
                .await?
            }
        };

        Ok(booking)
    }

    async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.db_pool)
            .await?;

        Ok(count)
    }
}

impl BookingStatusChange {
    /// The status a booking must currently have for this change to apply
    pub fn required_status(&self) -> BookingStatus {
        match self {
            BookingStatusChange::Cancel { .. } => BookingStatus::Confirmed,
            BookingStatusChange::Reconfirm => BookingStatus::Cancelled,
        }
    }

    /// Convenience constructor for a cancellation happening now
    pub fn cancel_now(actor: CancelActor) -> Self {
        BookingStatusChange::Cancel {
            actor,
            at: Utc::now(),
        }
    }
}
