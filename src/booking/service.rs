//! Booking service layer - pricing, creation and status transitions

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::booking::store::BookingStore;
use crate::booking::{
    Booking, BookingStatus, BookingStatusChange, BookingWithDetails, CancelActor,
    CreateBookingRequest, ListBookingsQuery, NewBooking,
};
use crate::error::ApiError;

/// Compute the total price of a stay.
///
/// Nights are the whole-day difference between check-out and check-in, with
/// a floor of one night. The floor means the result is always at least the
/// nightly price, even for same-day or inverted ranges handed to us by a
/// caller that skipped validation.
pub fn compute_stay_price(nightly_price: i64, check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    let nights = (check_out - check_in).num_days().max(1);
    nightly_price * nights
}

/// Booking lifecycle errors
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Booking not found")]
    NotFound,

    #[error("Room not found")]
    RoomNotFound,

    #[error("Room does not belong to the requested hotel")]
    RoomHotelMismatch,

    #[error("Booking does not belong to the requesting user")]
    NotOwner,

    #[error("Booking is {current:?}, cannot transition to {requested:?}")]
    InvalidTransition {
        current: BookingStatus,
        requested: BookingStatus,
    },

    #[error("Storage request timed out")]
    Timeout,

    #[error("Storage error: {0}")]
    Store(String),
}

impl From<BookingError> for ApiError {
    fn from(e: BookingError) -> Self {
        match e {
            BookingError::NotFound | BookingError::RoomNotFound => ApiError::NotFound(e.to_string()),
            BookingError::RoomHotelMismatch => ApiError::BadRequest(e.to_string()),
            BookingError::NotOwner => ApiError::Forbidden(e.to_string()),
            BookingError::InvalidTransition { .. } => ApiError::Conflict(e.to_string()),
            BookingError::Timeout => ApiError::ServiceUnavailable(e.to_string()),
            BookingError::Store(msg) => ApiError::DatabaseError(msg),
        }
    }
}

/// Booking service managing the reservation lifecycle
pub struct BookingService {
    store: Arc<dyn BookingStore>,
    request_timeout: Duration,
}

impl BookingService {
    /// Create new booking service instance
    pub fn new(store: Arc<dyn BookingStore>, request_timeout: Duration) -> Self {
        Self {
            store,
            request_timeout,
        }
    }

    /// Create a booking for a user.
    ///
    /// The total price is recomputed from the room's stored nightly price, so
    /// a client cannot supply its own total. Nothing is persisted when any
    /// precondition fails.
    pub async fn create_booking(
        &self,
        user_id: Uuid,
        request: CreateBookingRequest,
    ) -> Result<Booking, BookingError> {
        let room = self
            .with_deadline(self.store.fetch_room(request.room_id))
            .await?
            .ok_or(BookingError::RoomNotFound)?;

        if room.hotel_id != request.hotel_id {
            return Err(BookingError::RoomHotelMismatch);
        }

        let total_price = compute_stay_price(room.price, request.check_in, request.check_out);

        let booking = self
            .with_deadline(self.store.insert(NewBooking {
                user_id,
                hotel_id: request.hotel_id,
                room_id: request.room_id,
                check_in: request.check_in,
                check_out: request.check_out,
                total_price,
            }))
            .await?;

        tracing::info!(
            booking_id = %booking.id,
            user_id = %user_id,
            total_price = booking.total_price,
            "Booking created"
        );

        Ok(booking)
    }

    /// List a user's bookings with hotel and room details, newest first
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        query: ListBookingsQuery,
    ) -> Result<Vec<BookingWithDetails>, BookingError> {
        self.with_deadline(self.store.list_by_user(user_id, query))
            .await
    }

    /// List all bookings with details, newest first (admin view)
    pub async fn list_all(
        &self,
        query: ListBookingsQuery,
    ) -> Result<Vec<BookingWithDetails>, BookingError> {
        self.with_deadline(self.store.list_all(query)).await
    }

    /// Self-service cancellation by the booking's owner.
    ///
    /// Only a confirmed booking can be cancelled; a duplicate cancel is
    /// rejected so the first cancellation's attribution is never overwritten.
    pub async fn cancel_own_booking(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
    ) -> Result<Booking, BookingError> {
        let booking = self
            .with_deadline(self.store.find(booking_id))
            .await?
            .ok_or(BookingError::NotFound)?;

        if booking.user_id != user_id {
            return Err(BookingError::NotOwner);
        }

        self.apply_change(booking, BookingStatusChange::cancel_now(CancelActor::User))
            .await
    }

    /// Admin status change in either direction.
    ///
    /// Cancelling records admin attribution; re-confirming clears the
    /// cancellation fields. Requesting the status the booking already has is
    /// rejected as an invalid transition.
    pub async fn set_booking_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, BookingError> {
        let booking = self
            .with_deadline(self.store.find(booking_id))
            .await?
            .ok_or(BookingError::NotFound)?;

        let change = match status {
            BookingStatus::Cancelled => BookingStatusChange::cancel_now(CancelActor::Admin),
            BookingStatus::Confirmed => BookingStatusChange::Reconfirm,
        };

        self.apply_change(booking, change).await
    }

    /// Count all bookings (for the dashboard)
    pub async fn count(&self) -> Result<i64, BookingError> {
        self.with_deadline(self.store.count()).await
    }

    async fn apply_change(
        &self,
        booking: Booking,
        change: BookingStatusChange,
    ) -> Result<Booking, BookingError> {
        let requested = match change {
            BookingStatusChange::Cancel { .. } => BookingStatus::Cancelled,
            BookingStatusChange::Reconfirm => BookingStatus::Confirmed,
        };

        if booking.status != change.required_status() {
            return Err(BookingError::InvalidTransition {
                current: booking.status,
                requested,
            });
        }

        let updated = self
            .with_deadline(self.store.update_status(booking.id, change))
            .await?
            // The guarded update found a different status than we just read;
            // a concurrent transition won the race.
            .ok_or(BookingError::InvalidTransition {
                current: booking.status,
                requested,
            })?;

        tracing::info!(
            booking_id = %updated.id,
            status = ?updated.status,
            cancelled_by = ?updated.cancelled_by,
            "Booking status updated"
        );

        Ok(updated)
    }

    /// Run a store call under the configured deadline so a hung request
    /// surfaces as an error instead of stalling the caller indefinitely.
    async fn with_deadline<T, F>(&self, fut: F) -> Result<T, BookingError>
    where
        F: Future<Output = anyhow::Result<T>>,
    {
        match tokio::time::timeout(self.request_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(BookingError::Store(e.to_string())),
            Err(_) => Err(BookingError::Timeout),
        }
    }
}
