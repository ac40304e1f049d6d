//! Session repository for database operations.
//!
//! The cookie carries an opaque random token; only its SHA-256 is stored.

use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::entities::{sessions, users};

/// Session repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    db: DatabaseConnection,
}

impl SessionRepository {
    /// Creates a new session repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Hashes a session token for storage.
    #[must_use]
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Generates a random URL-safe session token.
    #[must_use]
    pub fn generate_token() -> String {
        let bytes: [u8; 32] = rand::random();
        base64_url::encode(&bytes)
    }

    /// Opens a session for a user.
    ///
    /// Returns the raw token (to be set as the cookie value) and the stored
    /// session.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        user_id: i32,
        ttl: Duration,
    ) -> Result<(String, sessions::Model), DbErr> {
        let raw_token = Self::generate_token();
        let now = Utc::now();

        let session = sessions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            token_hash: Set(Self::hash_token(&raw_token)),
            expires_at: Set((now + ttl).into()),
            revoked_at: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await?;

        Ok((raw_token, session))
    }

    /// Finds the unexpired, unrevoked session for a token, with its user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_active(
        &self,
        token: &str,
    ) -> Result<Option<(sessions::Model, users::Model)>, DbErr> {
        let found = sessions::Entity::find()
            .filter(sessions::Column::TokenHash.eq(Self::hash_token(token)))
            .filter(sessions::Column::RevokedAt.is_null())
            .filter(sessions::Column::ExpiresAt.gt(Utc::now()))
            .find_also_related(users::Entity)
            .one(&self.db)
            .await?;

        Ok(found.and_then(|(session, user)| user.map(|u| (session, u))))
    }

    /// Revokes the session behind a token.
    ///
    /// Returns false if no active session matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn revoke_by_token(&self, token: &str) -> Result<bool, DbErr> {
        let now = Utc::now();

        let result = sessions::Entity::update_many()
            .col_expr(
                sessions::Column::RevokedAt,
                sea_orm::sea_query::Expr::value(now),
            )
            .col_expr(
                sessions::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(now),
            )
            .filter(sessions::Column::TokenHash.eq(Self::hash_token(token)))
            .filter(sessions::Column::RevokedAt.is_null())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes expired sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn cleanup_expired(&self) -> Result<u64, DbErr> {
        let result = sessions::Entity::delete_many()
            .filter(sessions::Column::ExpiresAt.lt(Utc::now()))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
