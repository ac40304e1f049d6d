//! Authentication payloads and the session identity.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// The user bound to a valid session.
///
/// Handlers receive this explicitly; nothing reads it from global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// User ID.
    pub user_id: UserId,
    /// Username, used as the receiver identity on invoices.
    pub username: String,
}

impl SessionUser {
    /// Creates a new session identity.
    #[must_use]
    pub fn new(user_id: UserId, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Username.
    #[serde(default)]
    pub username: Option<String>,
    /// Plaintext password.
    #[serde(default)]
    pub password: Option<String>,
}

/// Registration request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Desired username.
    #[serde(default)]
    pub username: Option<String>,
    /// Plaintext password, checked against the password rule.
    #[serde(default)]
    pub password: Option<String>,
}

/// Login response payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Always true for a successful login.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// The authenticated user.
    pub user: SessionUser,
}
