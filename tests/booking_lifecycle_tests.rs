//! Booking lifecycle tests
//!
//! Exercises pricing, cancellation attribution and status transitions through
//! the service against an in-memory store.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use staynest_server::booking::{
    Booking, BookingError, BookingService, BookingStatus, BookingStatusChange, BookingStore,
    BookingWithDetails, CancelActor, CreateBookingRequest, ListBookingsQuery, NewBooking,
};
use staynest_server::hotel::Room;
use staynest_server::services::analytics::summarize_by_status;

/// In-memory stand-in for the PostgreSQL store
struct InMemoryStore {
    rooms: Mutex<Vec<Room>>,
    bookings: Mutex<Vec<Booking>>,
}

impl InMemoryStore {
    fn new(rooms: Vec<Room>) -> Self {
        Self {
            rooms: Mutex::new(rooms),
            bookings: Mutex::new(Vec::new()),
        }
    }

    fn details(&self, booking: &Booking) -> BookingWithDetails {
        let rooms = self.rooms.lock().unwrap();
        let room = rooms.iter().find(|r| r.id == booking.room_id);

        BookingWithDetails {
            id: booking.id,
            user_id: booking.user_id,
            hotel_id: booking.hotel_id,
            room_id: booking.room_id,
            check_in: booking.check_in,
            check_out: booking.check_out,
            total_price: booking.total_price,
            status: booking.status,
            created_at: booking.created_at,
            cancelled_at: booking.cancelled_at,
            cancelled_by: booking.cancelled_by,
            hotel_name: "Sea Breeze Resort".to_string(),
            hotel_location: "Goa".to_string(),
            room_type: room.map(|r| r.room_type.clone()).unwrap_or_default(),
            room_price: room.map(|r| r.price).unwrap_or_default(),
            guest_name: "Test Guest".to_string(),
        }
    }
}

#[async_trait]
impl BookingStore for InMemoryStore {
    async fn fetch_room(&self, room_id: Uuid) -> Result<Option<Room>> {
        Ok(self
            .rooms
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == room_id)
            .cloned())
    }

    async fn insert(&self, booking: NewBooking) -> Result<Booking> {
        let row = Booking {
            id: Uuid::new_v4(),
            user_id: booking.user_id,
            hotel_id: booking.hotel_id,
            room_id: booking.room_id,
            check_in: booking.check_in,
            check_out: booking.check_out,
            total_price: booking.total_price,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
            cancelled_at: None,
            cancelled_by: None,
        };
        self.bookings.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Booking>> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        query: ListBookingsQuery,
    ) -> Result<Vec<BookingWithDetails>> {
        let bookings = self.bookings.lock().unwrap().clone();
        Ok(bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .filter(|b| query.status.map_or(true, |s| b.status == s))
            .map(|b| self.details(b))
            .collect())
    }

    async fn list_all(&self, query: ListBookingsQuery) -> Result<Vec<BookingWithDetails>> {
        let bookings = self.bookings.lock().unwrap().clone();
        Ok(bookings
            .iter()
            .filter(|b| query.status.map_or(true, |s| b.status == s))
            .map(|b| self.details(b))
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        change: BookingStatusChange,
    ) -> Result<Option<Booking>> {
        let mut bookings = self.bookings.lock().unwrap();
        let Some(booking) = bookings.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        if booking.status != change.required_status() {
            return Ok(None);
        }

        match change {
            BookingStatusChange::Cancel { actor, at } => {
                booking.status = BookingStatus::Cancelled;
                booking.cancelled_at = Some(at);
                booking.cancelled_by = Some(actor);
            }
            BookingStatusChange::Reconfirm => {
                booking.status = BookingStatus::Confirmed;
                booking.cancelled_at = None;
                booking.cancelled_by = None;
            }
        }

        Ok(Some(booking.clone()))
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.bookings.lock().unwrap().len() as i64)
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn test_room(hotel_id: Uuid, nightly_price: i64) -> Room {
    Room {
        id: Uuid::new_v4(),
        hotel_id,
        room_type: "Deluxe".to_string(),
        price: nightly_price,
        capacity: 2,
        quantity: 4,
        description: "Sea-facing deluxe room".to_string(),
        created_at: Utc::now(),
    }
}

fn service_with(rooms: Vec<Room>) -> (BookingService, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new(rooms));
    let service = BookingService::new(store.clone(), Duration::from_secs(5));
    (service, store)
}

fn stay_request(hotel_id: Uuid, room_id: Uuid) -> CreateBookingRequest {
    CreateBookingRequest {
        hotel_id,
        room_id,
        check_in: date(2024, 3, 10),
        check_out: date(2024, 3, 13),
    }
}

// ============================================================================
// Pricing
// ============================================================================

#[tokio::test]
async fn test_create_booking_prices_three_nights() {
    let hotel_id = Uuid::new_v4();
    let room = test_room(hotel_id, 2000);
    let room_id = room.id;
    let (service, _) = service_with(vec![room]);

    let booking = service
        .create_booking(Uuid::new_v4(), stay_request(hotel_id, room_id))
        .await
        .unwrap();

    assert_eq!(booking.total_price, 6000);
    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert!(booking.cancelled_at.is_none());
    assert!(booking.cancelled_by.is_none());
}

#[tokio::test]
async fn test_create_booking_same_day_charges_one_night() {
    let hotel_id = Uuid::new_v4();
    let room = test_room(hotel_id, 1500);
    let room_id = room.id;
    let (service, _) = service_with(vec![room]);

    let request = CreateBookingRequest {
        hotel_id,
        room_id,
        check_in: date(2024, 3, 10),
        check_out: date(2024, 3, 10),
    };

    let booking = service.create_booking(Uuid::new_v4(), request).await.unwrap();
    assert_eq!(booking.total_price, 1500);
}

#[tokio::test]
async fn test_create_booking_unknown_room() {
    let (service, store) = service_with(vec![]);

    let result = service
        .create_booking(Uuid::new_v4(), stay_request(Uuid::new_v4(), Uuid::new_v4()))
        .await;

    assert!(matches!(result, Err(BookingError::RoomNotFound)));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_booking_room_from_other_hotel() {
    let hotel_id = Uuid::new_v4();
    let room = test_room(hotel_id, 2000);
    let room_id = room.id;
    let (service, store) = service_with(vec![room]);

    // Room exists but belongs to a different hotel than requested
    let result = service
        .create_booking(Uuid::new_v4(), stay_request(Uuid::new_v4(), room_id))
        .await;

    assert!(matches!(result, Err(BookingError::RoomHotelMismatch)));
    assert_eq!(store.count().await.unwrap(), 0);
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test]
async fn test_user_cancel_records_attribution() {
    let hotel_id = Uuid::new_v4();
    let room = test_room(hotel_id, 2000);
    let room_id = room.id;
    let (service, _) = service_with(vec![room]);
    let user_id = Uuid::new_v4();

    let booking = service
        .create_booking(user_id, stay_request(hotel_id, room_id))
        .await
        .unwrap();

    let cancelled = service.cancel_own_booking(booking.id, user_id).await.unwrap();

    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    assert_eq!(cancelled.cancelled_by, Some(CancelActor::User));
    assert!(cancelled.cancelled_at.is_some());
}

#[tokio::test]
async fn test_cancelled_booking_drops_out_of_revenue() {
    let hotel_id = Uuid::new_v4();
    let room = test_room(hotel_id, 2000);
    let room_id = room.id;
    let (service, _) = service_with(vec![room]);
    let user_id = Uuid::new_v4();

    let keep = service
        .create_booking(user_id, stay_request(hotel_id, room_id))
        .await
        .unwrap();
    let to_cancel = service
        .create_booking(user_id, stay_request(hotel_id, room_id))
        .await
        .unwrap();

    service
        .cancel_own_booking(to_cancel.id, user_id)
        .await
        .unwrap();

    let bookings = service
        .list_for_user(user_id, ListBookingsQuery::default())
        .await
        .unwrap();
    let summary = summarize_by_status(&bookings);

    assert_eq!(summary.confirmed, 1);
    assert_eq!(summary.cancelled, 1);
    assert_eq!(summary.confirmed_revenue, keep.total_price);
}

#[tokio::test]
async fn test_duplicate_cancel_keeps_first_attribution() {
    let hotel_id = Uuid::new_v4();
    let room = test_room(hotel_id, 2000);
    let room_id = room.id;
    let (service, store) = service_with(vec![room]);
    let user_id = Uuid::new_v4();

    let booking = service
        .create_booking(user_id, stay_request(hotel_id, room_id))
        .await
        .unwrap();

    let first = service.cancel_own_booking(booking.id, user_id).await.unwrap();
    let second = service.cancel_own_booking(booking.id, user_id).await;

    assert!(matches!(
        second,
        Err(BookingError::InvalidTransition { .. })
    ));

    let stored = store.find(booking.id).await.unwrap().unwrap();
    assert_eq!(stored.cancelled_at, first.cancelled_at);
    assert_eq!(stored.cancelled_by, Some(CancelActor::User));
}

#[tokio::test]
async fn test_cancel_requires_ownership() {
    let hotel_id = Uuid::new_v4();
    let room = test_room(hotel_id, 2000);
    let room_id = room.id;
    let (service, store) = service_with(vec![room]);
    let owner = Uuid::new_v4();

    let booking = service
        .create_booking(owner, stay_request(hotel_id, room_id))
        .await
        .unwrap();

    let result = service.cancel_own_booking(booking.id, Uuid::new_v4()).await;

    assert!(matches!(result, Err(BookingError::NotOwner)));
    let stored = store.find(booking.id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Confirmed);
}

#[tokio::test]
async fn test_cancel_unknown_booking() {
    let (service, _) = service_with(vec![]);

    let result = service.cancel_own_booking(Uuid::new_v4(), Uuid::new_v4()).await;

    assert!(matches!(result, Err(BookingError::NotFound)));
}

// ============================================================================
// Admin status changes
// ============================================================================

#[tokio::test]
async fn test_admin_cancel_attributes_admin() {
    let hotel_id = Uuid::new_v4();
    let room = test_room(hotel_id, 2000);
    let room_id = room.id;
    let (service, _) = service_with(vec![room]);

    let booking = service
        .create_booking(Uuid::new_v4(), stay_request(hotel_id, room_id))
        .await
        .unwrap();

    let cancelled = service
        .set_booking_status(booking.id, BookingStatus::Cancelled)
        .await
        .unwrap();

    assert_eq!(cancelled.cancelled_by, Some(CancelActor::Admin));
    assert!(cancelled.cancelled_at.is_some());
}

#[tokio::test]
async fn test_admin_reconfirm_clears_cancellation_fields() {
    let hotel_id = Uuid::new_v4();
    let room = test_room(hotel_id, 2000);
    let room_id = room.id;
    let (service, _) = service_with(vec![room]);
    let user_id = Uuid::new_v4();

    let booking = service
        .create_booking(user_id, stay_request(hotel_id, room_id))
        .await
        .unwrap();
    service.cancel_own_booking(booking.id, user_id).await.unwrap();

    let reconfirmed = service
        .set_booking_status(booking.id, BookingStatus::Confirmed)
        .await
        .unwrap();

    assert_eq!(reconfirmed.status, BookingStatus::Confirmed);
    assert!(reconfirmed.cancelled_at.is_none());
    assert!(reconfirmed.cancelled_by.is_none());
}

#[tokio::test]
async fn test_admin_cannot_set_current_status() {
    let hotel_id = Uuid::new_v4();
    let room = test_room(hotel_id, 2000);
    let room_id = room.id;
    let (service, _) = service_with(vec![room]);

    let booking = service
        .create_booking(Uuid::new_v4(), stay_request(hotel_id, room_id))
        .await
        .unwrap();

    let result = service
        .set_booking_status(booking.id, BookingStatus::Confirmed)
        .await;

    assert!(matches!(
        result,
        Err(BookingError::InvalidTransition { .. })
    ));
}
