//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken persistence operations
///
/// # Security Considerations
/// - Only the SHA-256 hash of a refresh token is ever stored
/// - A session lineage holds at most one record at any time
/// - Consuming a token must be atomic so a value can be redeemed once
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a refresh token, replacing any record of the same session
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The saved token
    /// * `Err(DomainError)` - Save failed
    async fn save(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by its hash and delete it in the same step
    ///
    /// Expired records are returned (and deleted) too; the caller decides
    /// what an expired record means. Of two concurrent calls with the same
    /// hash, at most one observes `Some`.
    ///
    /// # Example
    /// ```no_run
    /// # use ch_core::repositories::TokenRepository;
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let token_hash = "sha256_hash_of_token";
    ///
    /// match repo.find_and_consume(token_hash).await? {
    ///     Some(token) => println!("Rotating session {}", token.session_id),
    ///     None => println!("Token unknown or already used"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn find_and_consume(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Delete every refresh token of a user
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of tokens deleted
    async fn delete_for_user(&self, user_id: u64) -> Result<usize, DomainError>;

    /// Delete refresh tokens whose `expires_at` is at or before `now`
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of expired tokens deleted
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;

    /// Count unexpired refresh tokens of a user issued under `token_version`,
    /// i.e. live sessions
    async fn count_active_for_user(
        &self,
        user_id: u64,
        token_version: u32,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError>;
}
