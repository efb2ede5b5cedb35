//! Booking models and data structures for the Staynest backend

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;

/// Booking model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hotel_id: Uuid,
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate, // Exclusive, strictly after check_in
    pub total_price: i64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancelled_by: Option<CancelActor>,
}

/// Booking status
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

/// Who initiated a cancellation
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "cancel_actor", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CancelActor {
    User,
    Admin,
}

/// Closed set of status transitions a store may apply to a booking.
///
/// Each variant carries exactly the fields that transition must set, so a
/// caller cannot cancel without attribution or reconfirm with stale
/// cancellation fields left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatusChange {
    /// confirmed -> cancelled, recording who did it and when
    Cancel {
        actor: CancelActor,
        at: DateTime<Utc>,
    },
    /// cancelled -> confirmed, clearing cancellation fields
    Reconfirm,
}

/// Fields needed to persist a new booking
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: Uuid,
    pub hotel_id: Uuid,
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: i64,
}

/// Booking with hotel, room and guest details joined in
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct BookingWithDetails {
    // Booking fields
    pub id: Uuid,
    pub user_id: Uuid,
    pub hotel_id: Uuid,
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: i64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancelled_by: Option<CancelActor>,

    // Joined fields
    pub hotel_name: String,
    pub hotel_location: String,
    pub room_type: String,
    pub room_price: i64,
    pub guest_name: String,
}

/// Request DTO for creating a booking
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub hotel_id: Uuid,
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl CreateBookingRequest {
    /// Validate the requested stay at the API boundary
    pub fn validate(&self, today: NaiveDate) -> Result<(), String> {
        if self.check_out <= self.check_in {
            return Err("Check-out must be after check-in".to_string());
        }
        if self.check_in < today {
            return Err("Check-in cannot be in the past".to_string());
        }
        Ok(())
    }
}

/// Request DTO for the admin status change
#[derive(Debug, Deserialize)]
pub struct SetBookingStatusRequest {
    pub status: BookingStatus,
}

/// Query parameters for listing bookings
#[derive(Debug, Deserialize, Default)]
pub struct ListBookingsQuery {
    pub status: Option<BookingStatus>,
    /// Case-insensitive match against hotel name, room type or guest name
    /// (admin listing only)
    pub search: Option<String>,
}
