//! MySQL implementation of the UserRepository trait.
//!
//! Users live in `wp_charterhub_users`. This crate never creates users; it
//! reads them, bumps their token version and rewrites password hashes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use ch_core::domain::entities::user::{User, UserRole};
use ch_core::errors::DomainError;
use ch_core::repositories::UserRepository;

use super::{column_error, query_error};

const USER_COLUMNS: &str = "id, email, password_hash, role, token_version, verified, \
                            first_name, last_name, created_at, updated_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let role: String = row.try_get("role").map_err(|e| column_error("role", e))?;
        let role = role.parse::<UserRole>().map_err(|e| DomainError::Internal {
            message: format!("Invalid role: {}", e),
        })?;

        Ok(User {
            id: row.try_get("id").map_err(|e| column_error("id", e))?,
            email: row.try_get("email").map_err(|e| column_error("email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| column_error("password_hash", e))?,
            role,
            token_version: row
                .try_get("token_version")
                .map_err(|e| column_error("token_version", e))?,
            verified: row.try_get("verified").map_err(|e| column_error("verified", e))?,
            first_name: row.try_get("first_name").map_err(|e| column_error("first_name", e))?,
            last_name: row.try_get("last_name").map_err(|e| column_error("last_name", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column_error("updated_at", e))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: u64) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM wp_charterhub_users WHERE id = ?", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to find user by id", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        // The column collation is case-insensitive
        let query = format!("SELECT {} FROM wp_charterhub_users WHERE email = ?", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to find user by email", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn current_token_version(&self, id: u64) -> Result<Option<u32>, DomainError> {
        let row = sqlx::query("SELECT token_version FROM wp_charterhub_users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to read token version", e))?;

        row.map(|row| {
            row.try_get::<u32, _>("token_version")
                .map_err(|e| column_error("token_version", e))
        })
        .transpose()
    }

    async fn increment_token_version(&self, id: u64) -> Result<Option<u32>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_error("Failed to begin transaction", e))?;

        let updated = sqlx::query(
            "UPDATE wp_charterhub_users SET token_version = token_version + 1 WHERE id = ?",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| query_error("Failed to increment token version", e))?;

        if updated.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| query_error("Failed to roll back transaction", e))?;
            return Ok(None);
        }

        let row = sqlx::query("SELECT token_version FROM wp_charterhub_users WHERE id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| query_error("Failed to read token version", e))?;
        let version: u32 = row
            .try_get("token_version")
            .map_err(|e| column_error("token_version", e))?;

        tx.commit()
            .await
            .map_err(|e| query_error("Failed to commit transaction", e))?;

        Ok(Some(version))
    }

    async fn update_password_hash(&self, id: u64, password_hash: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE wp_charterhub_users SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to update password hash", e))?;

        Ok(result.rows_affected() > 0)
    }
}
