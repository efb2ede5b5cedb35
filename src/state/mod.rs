//! Application state

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::AuthService;
use crate::booking::BookingService;
use crate::hotel::HotelService;
use crate::profile::ProfileService;

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub profile_service: Arc<ProfileService>,
    pub hotel_service: Arc<HotelService>,
    pub booking_service: Arc<BookingService>,
}

// Lets the auth extractors pull the service straight out of router state
impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(state: &AppState) -> Self {
        state.auth_service.clone()
    }
}
