//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{User, UserRole};

/// Token type reported to clients
pub const TOKEN_TYPE: &str = "Bearer";

/// Claims structure for the access token payload
///
/// Field order is the serialized order: `{sub, role, ver, iat, exp}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: u64,

    /// Role of the subject at issue time
    pub role: UserRole,

    /// Token version of the subject at issue time
    pub ver: u32,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates claims for an access token issued at `issued_at`
    pub fn new(user: &User, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: user.id,
            role: user.role,
            ver: user.token_version,
            iat,
            exp: iat + lifetime.num_seconds(),
        }
    }

    /// An access token is dead from the `exp` second onwards
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> u64 {
        self.sub
    }
}

/// Refresh token record stored in `wp_charterhub_refresh_tokens`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the record
    pub id: Uuid,

    /// User ID this token belongs to
    pub user_id: u64,

    /// Session lineage; one live record per session
    pub session_id: Uuid,

    /// Token version of the user when this record was issued
    pub token_version: u32,

    /// SHA-256 hex of the opaque token value
    pub token_hash: String,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Creates a new refresh token record for `user` in a session lineage
    pub fn new(
        user: &User,
        session_id: Uuid,
        token_hash: String,
        created_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user.id,
            session_id,
            token_version: user.token_version,
            token_hash,
            created_at,
            expires_at: created_at + lifetime,
        }
    }

    /// Checks if the refresh token has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Gets the time remaining until expiration, or zero if expired
    pub fn time_until_expiration(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// Opaque refresh token
    pub refresh_token: String,

    /// Always "Bearer"
    pub token_type: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(access_token: String, refresh_token: String, expires_in: i64, refresh_expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in,
            refresh_expires_in,
        }
    }
}
