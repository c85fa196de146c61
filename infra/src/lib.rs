//! Infrastructure layer for the CharterHub server
//!
//! MySQL connection pooling, embedded migrations and the sqlx-backed
//! implementations of the `ch_core` repository traits.

pub mod database;

pub use database::connection::{DatabasePool, PoolStatistics};
pub use database::mysql::{MySqlTokenRepository, MySqlUserRepository};

use ch_shared::DatabaseConfig;

/// Infrastructure error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Connect to the database and apply pending migrations when configured
pub async fn initialize(config: &DatabaseConfig) -> Result<DatabasePool, InfrastructureError> {
    let pool = DatabasePool::new(config.clone()).await?;

    if config.run_migrations {
        pool.run_migrations().await?;
    } else {
        tracing::info!("Skipping database migrations");
    }

    Ok(pool)
}
