//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Refresh token cookie settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Name of the HTTP-only cookie carrying the refresh token
    pub cookie_name: String,

    /// Cookie path; the refresh token is only sent to the auth endpoints
    pub cookie_path: String,

    /// Session cookie secure flag (HTTPS only)
    pub secure: bool,

    /// Session cookie SameSite attribute
    pub same_site: String,

    /// Session cookie HttpOnly flag
    #[serde(default = "default_http_only")]
    pub http_only: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: String::from("charterhub_refresh"),
            cookie_path: String::from("/api/auth"),
            secure: false, // Set to true in production
            same_site: String::from("Strict"),
            http_only: default_http_only(),
        }
    }
}

/// Password hashing policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor
    pub bcrypt_cost: u32,

    /// Minimum accepted length for new passwords
    pub min_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: 12,
            min_length: 8,
        }
    }
}

/// Background cleanup of expired refresh tokens
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CleanupConfig {
    /// Whether to run the cleanup task at all
    pub enabled: bool,

    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: 3600, // Run every hour
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Refresh cookie configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Password hashing configuration
    #[serde(default)]
    pub password: PasswordConfig,

    /// Expired token cleanup configuration
    #[serde(default)]
    pub cleanup: CleanupConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let jwt_defaults = JwtConfig::default();
        let password_defaults = PasswordConfig::default();
        let cleanup_defaults = CleanupConfig::default();

        Self {
            jwt: JwtConfig {
                secret: std::env::var("JWT_SECRET").unwrap_or(jwt_defaults.secret),
                access_token_expiry: env_or("JWT_ACCESS_TOKEN_EXPIRY", jwt_defaults.access_token_expiry),
                refresh_token_expiry: env_or("JWT_REFRESH_TOKEN_EXPIRY", jwt_defaults.refresh_token_expiry),
            },
            session: SessionConfig {
                secure: env_or("SESSION_COOKIE_SECURE", false),
                ..SessionConfig::default()
            },
            password: PasswordConfig {
                bcrypt_cost: env_or("BCRYPT_COST", password_defaults.bcrypt_cost),
                min_length: env_or("PASSWORD_MIN_LENGTH", password_defaults.min_length),
            },
            cleanup: CleanupConfig {
                enabled: env_or("TOKEN_CLEANUP_ENABLED", cleanup_defaults.enabled),
                interval_seconds: env_or("TOKEN_CLEANUP_INTERVAL", cleanup_defaults.interval_seconds),
            },
        }
    }
}

/// Read and parse an environment variable, falling back on absence or parse failure
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn default_http_only() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 604800);
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14);

        assert_eq!(config.access_token_expiry, 1800);
        assert_eq!(config.refresh_token_expiry, 1209600);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie_name, "charterhub_refresh");
        assert_eq!(config.cookie_path, "/api/auth");
        assert!(config.http_only);
        assert!(!config.secure);
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        std::env::set_var("CH_TEST_ENV_OR_GARBAGE", "not-a-number");
        assert_eq!(env_or("CH_TEST_ENV_OR_GARBAGE", 42u32), 42);
        assert_eq!(env_or("CH_TEST_ENV_OR_MISSING", 7i64), 7);

        std::env::set_var("CH_TEST_ENV_OR_SET", "11");
        assert_eq!(env_or("CH_TEST_ENV_OR_SET", 0u64), 11);
    }
}
