//! Configuration module with business-specific sub-modules
//!
//! - `auth` - JWT signing, refresh cookie, password hashing and token cleanup
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection
//! - `server` - HTTP server configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{AuthConfig, CleanupConfig, JwtConfig, PasswordConfig, SessionConfig};
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use server::ServerConfig;

/// Minimum accepted JWT secret length in bytes outside development
pub const MIN_SECRET_LENGTH: usize = 32;

/// Configuration problems detected at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set in {environment}")]
    DefaultSecret { environment: Environment },

    #[error("JWT_SECRET must be at least {min} bytes (got {actual})")]
    SecretTooShort { min: usize, actual: usize },

    #[error("Invalid token lifetime: {field} must be positive")]
    InvalidLifetime { field: &'static str },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let mut auth = AuthConfig::from_env();
        if environment.is_production() {
            auth.session.secure = true;
        }

        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth,
        }
    }

    /// Reject configurations that must never reach a deployed environment
    pub fn validate(&self) -> Result<(), ConfigError> {
        let jwt = &self.auth.jwt;

        if jwt.access_token_expiry <= 0 {
            return Err(ConfigError::InvalidLifetime { field: "access_token_expiry" });
        }
        if jwt.refresh_token_expiry <= 0 {
            return Err(ConfigError::InvalidLifetime { field: "refresh_token_expiry" });
        }

        if self.environment.is_development() {
            return Ok(());
        }

        if jwt.is_using_default_secret() {
            return Err(ConfigError::DefaultSecret { environment: self.environment });
        }
        if jwt.secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::SecretTooShort {
                min: MIN_SECRET_LENGTH,
                actual: jwt.secret.len(),
            });
        }

        Ok(())
    }
}
