//! MySQL implementation of the TokenRepository trait.
//!
//! Refresh tokens live in `wp_charterhub_refresh_tokens`, keyed by their
//! SHA-256 hash with at most one row per session lineage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ch_core::domain::entities::token::RefreshToken;
use ch_core::errors::DomainError;
use ch_core::repositories::TokenRepository;

use super::{column_error, query_error};

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to RefreshToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<RefreshToken, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        let session_id: String = row
            .try_get("session_id")
            .map_err(|e| column_error("session_id", e))?;

        Ok(RefreshToken {
            id: parse_uuid(&id)?,
            user_id: row.try_get("user_id").map_err(|e| column_error("user_id", e))?,
            session_id: parse_uuid(&session_id)?,
            token_version: row
                .try_get("token_version")
                .map_err(|e| column_error("token_version", e))?,
            token_hash: row
                .try_get("token_hash")
                .map_err(|e| column_error("token_hash", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| column_error("expires_at", e))?,
        })
    }
}

fn parse_uuid(value: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|e| DomainError::Internal {
        message: format!("Invalid UUID: {}", e),
    })
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn save(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        // A rotation overwrites the row of its session
        sqlx::query(
            r#"
            INSERT INTO wp_charterhub_refresh_tokens
                (id, user_id, session_id, token_version, token_hash, created_at, expires_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                id = VALUES(id),
                token_version = VALUES(token_version),
                token_hash = VALUES(token_hash),
                created_at = VALUES(created_at),
                expires_at = VALUES(expires_at)
            "#,
        )
        .bind(token.id.to_string())
        .bind(token.user_id)
        .bind(token.session_id.to_string())
        .bind(token.token_version)
        .bind(&token.token_hash)
        .bind(token.created_at)
        .bind(token.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("Failed to save refresh token", e))?;

        Ok(token)
    }

    async fn find_and_consume(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_error("Failed to begin transaction", e))?;

        // The row lock makes concurrent consumers wait, then find nothing
        let row = sqlx::query(
            r#"
            SELECT id, user_id, session_id, token_version, token_hash, created_at, expires_at
            FROM wp_charterhub_refresh_tokens
            WHERE token_hash = ?
            FOR UPDATE
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| query_error("Failed to find refresh token", e))?;

        let token = match row {
            Some(row) => Self::row_to_token(&row)?,
            None => {
                tx.rollback()
                    .await
                    .map_err(|e| query_error("Failed to roll back transaction", e))?;
                return Ok(None);
            }
        };

        sqlx::query("DELETE FROM wp_charterhub_refresh_tokens WHERE id = ?")
            .bind(token.id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| query_error("Failed to delete refresh token", e))?;

        tx.commit()
            .await
            .map_err(|e| query_error("Failed to commit transaction", e))?;

        Ok(Some(token))
    }

    async fn delete_for_user(&self, user_id: u64) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM wp_charterhub_refresh_tokens WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to delete refresh tokens for user", e))?;

        Ok(result.rows_affected() as usize)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM wp_charterhub_refresh_tokens WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to delete expired refresh tokens", e))?;

        Ok(result.rows_affected() as usize)
    }

    async fn count_active_for_user(
        &self,
        user_id: u64,
        token_version: u32,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS count FROM wp_charterhub_refresh_tokens \
             WHERE user_id = ? AND token_version = ? AND expires_at > ?",
        )
        .bind(user_id)
        .bind(token_version)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_error("Failed to count refresh tokens", e))?;

        let count: i64 = row.try_get("count").map_err(|e| column_error("count", e))?;
        Ok(count as usize)
    }
}
