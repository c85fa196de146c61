//! Main token service implementation

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshToken, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{TokenRepository, UserRepository};

use super::clock::{Clock, SystemClock};
use super::config::TokenServiceConfig;

/// Refresh tokens carry 256 bits of randomness
const REFRESH_TOKEN_BYTES: usize = 32;

/// Service issuing, validating and rotating tokens
///
/// Access tokens are HS256 JWTs over `{sub, role, ver, iat, exp}`. They are
/// never stored; a token is valid while its signature checks out, `exp` lies
/// ahead of the clock and `ver` equals the user's current token version.
///
/// Refresh tokens are opaque random values stored only as SHA-256 hashes,
/// one per session lineage, and replaced on every use.
pub struct TokenService<U, R, C = SystemClock>
where
    U: UserRepository,
    R: TokenRepository,
    C: Clock,
{
    users: Arc<U>,
    tokens: Arc<R>,
    clock: Arc<C>,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<U, R> TokenService<U, R, SystemClock>
where
    U: UserRepository,
    R: TokenRepository,
{
    /// Creates a token service on the system clock
    pub fn new(users: Arc<U>, tokens: Arc<R>, config: TokenServiceConfig) -> Self {
        Self::with_clock(users, tokens, Arc::new(SystemClock), config)
    }
}

impl<U, R, C> TokenService<U, R, C>
where
    U: UserRepository,
    R: TokenRepository,
    C: Clock,
{
    /// Creates a token service reading time from `clock`
    pub fn with_clock(users: Arc<U>, tokens: Arc<R>, clock: Arc<C>, config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Expiry is compared against the injected clock in `validate`
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            users,
            tokens,
            clock,
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issues a token pair for a user, starting a new session lineage
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The generated token pair
    /// * `Err(AuthError::AccountNotVerified)` - The user may not authenticate
    /// * `Err(DomainError)` - Signing or storage failed
    pub async fn issue(&self, user: &User) -> DomainResult<TokenPair> {
        if !user.verified {
            debug!(user_id = user.id, "Refusing to issue tokens to unverified user");
            return Err(AuthError::AccountNotVerified.into());
        }

        let pair = self.issue_in_session(user, Uuid::new_v4()).await?;
        info!(user_id = user.id, role = %user.role, "Issued token pair");
        Ok(pair)
    }

    /// Validates an access token and returns its claims
    ///
    /// Every failure is a `TokenError`; callers must not reveal which one.
    pub async fn validate(&self, token: &str) -> DomainResult<Claims> {
        let claims = self.decode_claims(token).map_err(rejected)?;

        if claims.is_expired_at(self.clock.now()) {
            return Err(rejected(TokenError::Expired));
        }

        match self.users.find_by_id(claims.sub).await? {
            Some(user) if !user.verified => Err(rejected(TokenError::UnknownSubject)),
            Some(user) if user.token_version != claims.ver => Err(rejected(TokenError::VersionMismatch)),
            Some(_) => Ok(claims),
            None => Err(rejected(TokenError::UnknownSubject)),
        }
    }

    /// Exchanges a refresh token for a new pair in the same session lineage
    ///
    /// The presented token is consumed before anything else is checked, so
    /// it cannot be redeemed twice and an expired record is purged.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let token_hash = self.hash_token(refresh_token);

        let record = self
            .tokens
            .find_and_consume(&token_hash)
            .await?
            .ok_or_else(|| rejected(TokenError::RefreshTokenNotFound))?;

        if record.is_expired_at(self.clock.now()) {
            return Err(rejected(TokenError::RefreshTokenExpired));
        }

        let user = match self.users.find_by_id(record.user_id).await? {
            Some(user) if user.verified => user,
            _ => return Err(rejected(TokenError::UnknownSubject)),
        };

        // Sessions revoked while this record was in flight
        if user.token_version != record.token_version {
            return Err(rejected(TokenError::VersionMismatch));
        }

        let pair = self.issue_in_session(&user, record.session_id).await?;
        debug!(user_id = user.id, session_id = %record.session_id, "Rotated refresh token");
        Ok(pair)
    }

    /// Revokes a single refresh token (logout of one session)
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - A session was ended
    /// * `Ok(false)` - Token unknown or already used
    pub async fn revoke_refresh_token(&self, refresh_token: &str) -> DomainResult<bool> {
        let token_hash = self.hash_token(refresh_token);

        let revoked = self.tokens.find_and_consume(&token_hash).await?;
        if let Some(record) = &revoked {
            info!(user_id = record.user_id, session_id = %record.session_id, "Revoked refresh token");
        }

        Ok(revoked.is_some())
    }

    /// Invalidates every access and refresh token of a user
    ///
    /// # Returns
    ///
    /// * `Ok(u32)` - The user's new token version
    /// * `Err(DomainError::NotFound)` - No such user
    pub async fn revoke_all(&self, user_id: u64) -> DomainResult<u32> {
        let version = self
            .users
            .increment_token_version(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("User {}", user_id),
            })?;

        let deleted = self.tokens.delete_for_user(user_id).await?;
        info!(
            user_id,
            token_version = version,
            refresh_tokens_deleted = deleted,
            "Revoked all sessions"
        );

        Ok(version)
    }

    /// Number of unexpired refresh tokens of a user
    ///
    /// Records left under an older token version can never be redeemed and
    /// are not counted.
    pub async fn active_sessions(&self, user_id: u64) -> DomainResult<usize> {
        match self.users.current_token_version(user_id).await? {
            Some(version) => {
                self.tokens
                    .count_active_for_user(user_id, version, self.clock.now())
                    .await
            }
            None => Ok(0),
        }
    }

    /// Removes expired refresh tokens from storage
    pub async fn cleanup_expired(&self) -> DomainResult<usize> {
        self.tokens.delete_expired(self.clock.now()).await
    }

    /// Decodes and verifies the signature of an access token
    ///
    /// Expiry and token version are not checked here; see [`TokenService::validate`].
    pub fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::SignatureMismatch,
                _ => TokenError::MalformedToken,
            })
    }

    pub fn access_token_lifetime(&self) -> Duration {
        self.config.access_token_lifetime
    }

    pub fn refresh_token_lifetime(&self) -> Duration {
        self.config.refresh_token_lifetime
    }

    async fn issue_in_session(&self, user: &User, session_id: Uuid) -> DomainResult<TokenPair> {
        let now = self.clock.now();

        let claims = Claims::new(user, now, self.config.access_token_lifetime);
        let access_token = self.encode_jwt(&claims)?;

        let refresh_token = generate_refresh_value();
        let record = RefreshToken::new(
            user,
            session_id,
            self.hash_token(&refresh_token),
            now,
            self.config.refresh_token_lifetime,
        );
        self.tokens.save(record).await?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_lifetime.num_seconds(),
            self.config.refresh_token_lifetime.num_seconds(),
        ))
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.encoding_key).map_err(|e| {
            warn!(error = %e, "JWT encoding failed");
            DomainError::Token(TokenError::GenerationFailed)
        })
    }

    /// Hashes a token for secure storage
    pub(crate) fn hash_token(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

fn generate_refresh_value() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn rejected(error: TokenError) -> DomainError {
    match error {
        TokenError::SignatureMismatch => warn!(reason = error.reason(), "Token rejected"),
        _ => debug!(reason = error.reason(), "Token rejected"),
    }
    DomainError::Token(error)
}
