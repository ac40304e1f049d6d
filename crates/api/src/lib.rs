//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes under `/api`
//! - Session cookie middleware
//! - Error rendering

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use crpms_shared::{AppConfig, SessionConfig};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Session cookie settings.
    pub session: Arc<SessionConfig>,
    /// Browser origin allowed to call the API with credentials.
    pub frontend_origin: HeaderValue,
}

impl AppState {
    /// Builds the state from a connection and the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `server.frontend_url` is not a valid header value.
    pub fn new(
        db: DatabaseConnection,
        config: &AppConfig,
    ) -> Result<Self, axum::http::header::InvalidHeaderValue> {
        Ok(Self {
            db: Arc::new(db),
            session: Arc::new(config.session.clone()),
            frontend_origin: HeaderValue::from_str(&config.server.frontend_url)?,
        })
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.frontend_origin.clone())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest("/api", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
