//! Router-level tests for the authentication and validation branches
//! that resolve before any storage call.
//!
//! The pool is created lazily and never connected: every asserted
//! branch (missing token, bad token, payload validation) terminates
//! before the first query.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use motorbid_server::app_state::AppState;
use motorbid_server::auctions::AuctionService;
use motorbid_server::inquiries::InquiryService;
use motorbid_server::routes;
use motorbid_server::token::TokenService;
use motorbid_server::uploads::UploadService;
use motorbid_server::users::UserService;
use motorbid_server::vehicles::VehicleService;

const TEST_SECRET: &str = "test-secret";

fn test_app() -> axum::Router {
    let pool = Arc::new(
        PgPoolOptions::new()
            .connect_lazy("postgresql://localhost/motorbid_test")
            .expect("lazy pool"),
    );
    let state = AppState::new(
        Arc::new(UserService::new(pool.clone())),
        Arc::new(VehicleService::new(pool.clone())),
        Arc::new(AuctionService::new(pool.clone())),
        Arc::new(InquiryService::new(pool.clone())),
        Arc::new(TokenService::new(TEST_SECRET)),
        Arc::new(UploadService::new(None)),
    );
    routes::router(state)
}

#[tokio::test]
async fn health_is_public() {
    let response = test_app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_token_is_401() {
    for (method, uri) in [
        ("GET", "/api/users/me"),
        ("GET", "/api/users"),
        ("GET", "/api/inquiries"),
        ("DELETE", "/api/vehicles/7f2f9d5e-6f59-4a54-9d5e-0b3c8a3b1de2"),
        ("DELETE", "/api/auctions/7f2f9d5e-6f59-4a54-9d5e-0b3c8a3b1de2"),
    ] {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{method} {uri}"
        );
    }
}

#[tokio::test]
async fn garbage_token_is_403() {
    let request = Request::get("/api/users/me")
        .header(header::AUTHORIZATION, "Bearer not-a-real-token")
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn token_signed_with_the_wrong_secret_is_403() {
    let foreign = TokenService::new("some-other-secret");
    let token = foreign.issue(uuid::Uuid::new_v4()).unwrap();

    let request = Request::get("/api/users/me")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn register_with_missing_fields_is_400() {
    let request = Request::post("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"username":"a"}"#))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_with_a_short_password_is_400() {
    let request = Request::post("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"username":"a","email":"a@x.com","password":"short"}"#,
        ))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_with_an_empty_email_is_400() {
    let request = Request::post("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"email":"","password":"whatever"}"#))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
