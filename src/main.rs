//! Motorbid backend server.
//!
//! Vehicle auction marketplace API: registration/login, vehicle
//! listings, auction records, and customer inquiries, gated by
//! role-based access control.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use motorbid_server::app_state::AppState;
use motorbid_server::auctions::AuctionService;
use motorbid_server::config::Config;
use motorbid_server::inquiries::InquiryService;
use motorbid_server::routes;
use motorbid_server::token::TokenService;
use motorbid_server::uploads::UploadService;
use motorbid_server::users::UserService;
use motorbid_server::vehicles::VehicleService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database connected, migrations applied");

    let pool = Arc::new(pool);
    let state = AppState::new(
        Arc::new(UserService::new(pool.clone())),
        Arc::new(VehicleService::new(pool.clone())),
        Arc::new(AuctionService::new(pool.clone())),
        Arc::new(InquiryService::new(pool.clone())),
        Arc::new(TokenService::new(&config.jwt_secret)),
        Arc::new(UploadService::new(config.image_host.clone())),
    );

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors()?);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the CORS layer from CORS_ALLOWED_ORIGINS (comma-separated).
/// Unset or empty falls back to a permissive layer; a malformed origin
/// aborts startup.
fn build_cors() -> anyhow::Result<CorsLayer> {
    let raw = std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default();

    let origins = parse_origins(&raw)?;
    if origins.is_empty() {
        tracing::warn!("CORS_ALLOWED_ORIGINS is empty; all origins will be accepted");
        return Ok(CorsLayer::permissive());
    }

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any))
}

fn parse_origins(raw: &str) -> anyhow::Result<Vec<HeaderValue>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin {s:?}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_list_parses_and_trims() {
        let origins = parse_origins("https://motorbid.example, http://localhost:3000").unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "https://motorbid.example");
        assert_eq!(origins[1], "http://localhost:3000");
    }

    #[test]
    fn empty_origin_list_is_empty_not_an_error() {
        assert!(parse_origins("").unwrap().is_empty());
        assert!(parse_origins(" , ").unwrap().is_empty());
    }

    #[test]
    fn malformed_origin_is_rejected() {
        assert!(parse_origins("https://ok.example, bad\norigin").is_err());
    }
}
