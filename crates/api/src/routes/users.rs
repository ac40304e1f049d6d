//! User routes: registration, login, logout and session check.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use crpms_core::auth::{check_password_policy, hash_password, verify_password};
use crpms_core::validation::{require_present, require_text};
use crpms_db::{SessionRepository, UserRepository};
use crpms_shared::auth::{LoginRequest, LoginResponse, RegisterRequest};
use crpms_shared::types::UserId;
use crpms_shared::{AppError, SessionUser};
use serde_json::json;
use tracing::info;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;

/// Routes reachable without a session.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
}

/// Routes that require a session.
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/users/logout", post(logout))
        .route("/users/check", get(check))
}

fn invalid_credentials() -> ApiError {
    ApiError(AppError::Unauthenticated(
        "Invalid username or password".to_string(),
    ))
}

/// POST /users/register - Create an account.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let username = require_text(payload.username.as_deref(), "username")?;
    let password = require_present(payload.password.as_deref(), "password")?;

    check_password_policy(password)?;
    let password_hash = hash_password(password)?;

    let user = UserRepository::new((*state.db).clone())
        .create(username, &password_hash)
        .await?;

    info!(user_id = user.user_id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "User registered successfully",
            "userId": user.user_id,
        })),
    ))
}

/// POST /users/login - Verify credentials and open a session.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let username = require_text(payload.username.as_deref(), "username")?;
    let password = require_present(payload.password.as_deref(), "password")?;

    let Some(user) = UserRepository::new((*state.db).clone())
        .find_by_username(username)
        .await?
    else {
        info!(username = %username, "Login attempt for non-existent user");
        return Err(invalid_credentials());
    };

    if !verify_password(password, &user.password_hash)? {
        info!(user_id = user.user_id, "Failed login attempt - invalid password");
        return Err(invalid_credentials());
    }

    let (token, _) = SessionRepository::new((*state.db).clone())
        .create(user.user_id, chrono::Duration::hours(state.session.ttl_hours))
        .await?;

    let cookie = Cookie::build((state.session.cookie_name.clone(), token))
        .http_only(true)
        .secure(state.session.secure)
        .same_site(SameSite::Lax)
        .path("/")
        .build();

    info!(user_id = user.user_id, "User logged in successfully");

    let response = LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        user: SessionUser::new(UserId(user.user_id), user.username),
    };

    Ok((jar.add(cookie), Json(response)))
}

/// POST /users/logout - Revoke the session and clear the cookie.
async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> ApiResult<impl IntoResponse> {
    if let Some(cookie) = jar.get(&state.session.cookie_name) {
        SessionRepository::new((*state.db).clone())
            .revoke_by_token(cookie.value())
            .await?;
    }

    info!(user_id = %auth.user_id(), "User logged out");

    let mut removal = Cookie::from(state.session.cookie_name.clone());
    removal.set_path("/");

    Ok((
        jar.remove(removal),
        Json(json!({
            "success": true,
            "message": "Logout successful",
        })),
    ))
}

/// GET /users/check - Return the session user.
async fn check(AuthUser(user): AuthUser) -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "user": user,
    }))
}
