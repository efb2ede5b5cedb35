//! Route guard tests
//!
//! Verifies the authentication extractors at the router level without a live
//! database: a lazy pool never connects because rejection happens before any
//! handler runs.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use tower::ServiceExt;
use uuid::Uuid;

use staynest_server::auth::{generate_access_token, AuthService};
use staynest_server::booking::{BookingService, PgBookingStore};
use staynest_server::hotel::HotelService;
use staynest_server::models::{Profile, UserRole};
use staynest_server::profile::ProfileService;
use staynest_server::routes;
use staynest_server::state::AppState;

const TEST_SECRET: &str = "route-guard-test-secret";

fn test_app() -> Router {
    let db_pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgresql://localhost/staynest_unreachable")
        .expect("lazy pool");

    let state = AppState {
        auth_service: Arc::new(AuthService::new(db_pool.clone(), TEST_SECRET.to_string(), 3600)),
        profile_service: Arc::new(ProfileService::new(db_pool.clone())),
        hotel_service: Arc::new(HotelService::new(db_pool.clone())),
        booking_service: Arc::new(BookingService::new(
            Arc::new(PgBookingStore::new(db_pool)),
            Duration::from_secs(5),
        )),
    };

    Router::new()
        .merge(routes::auth_routes())
        .merge(routes::booking_routes())
        .merge(routes::admin_routes())
        .with_state(state)
}

fn token_for(role: UserRole) -> String {
    let profile = Profile {
        id: Uuid::new_v4(),
        full_name: "Guard Test".to_string(),
        email: "guard@example.com".to_string(),
        password_hash: "hash".to_string(),
        role,
        created_at: Utc::now(),
    };

    generate_access_token(&profile, TEST_SECRET, 3600).unwrap()
}

#[tokio::test]
async fn test_bookings_require_authentication() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/bookings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_routes_reject_missing_token() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_routes_reject_regular_users() {
    let app = test_app();
    let token = token_for(UserRole::User);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/dashboard")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/bookings")
                .header(header::AUTHORIZATION, "Bearer not.a.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
