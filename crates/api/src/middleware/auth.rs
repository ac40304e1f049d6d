//! Session middleware for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use crpms_db::SessionRepository;
use crpms_shared::SessionUser;
use crpms_shared::types::UserId;
use tracing::{debug, error};

use crate::AppState;
use crate::error::ApiError;

/// Session middleware that resolves the cookie to a user.
///
/// This middleware:
/// 1. Reads the session token from the configured cookie
/// 2. Looks up the active (unexpired, unrevoked) session
/// 3. Stores the [`SessionUser`] in request extensions for handlers
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = jar.get(&state.session.cookie_name).map(|c| c.value().to_string()) else {
        return ApiError::unauthenticated().into_response();
    };

    let sessions = SessionRepository::new((*state.db).clone());
    match sessions.find_active(&token).await {
        Ok(Some((_, user))) => {
            request
                .extensions_mut()
                .insert(SessionUser::new(UserId(user.user_id), user.username));
            next.run(request).await
        }
        Ok(None) => {
            debug!("Rejected unknown or expired session cookie");
            ApiError::unauthenticated().into_response()
        }
        Err(e) => {
            error!(error = %e, "Database error during session lookup");
            ApiError::from(e).into_response()
        }
    }
}

/// Extractor for the authenticated session user.
///
/// ```ignore
/// async fn handler(AuthUser(user): AuthUser) -> impl IntoResponse {
///     user.username
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub SessionUser);

impl AuthUser {
    /// Returns the user ID.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.0.user_id
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.0.username
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(ApiError::unauthenticated)
    }
}
