//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::session_middleware};

pub mod cars;
pub mod health;
pub mod payments;
pub mod reports;
pub mod service_records;
pub mod services;
pub mod users;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require a session
    let protected_routes = Router::new()
        .merge(users::session_routes())
        .merge(cars::routes())
        .merge(services::routes())
        .merge(service_records::routes())
        .merge(payments::routes())
        .merge(reports::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    // Combine public and protected routes
    Router::new()
        .merge(health::routes())
        .merge(users::public_routes())
        .merge(protected_routes)
}
