//! User repository trait defining the interface for user data persistence.
//!
//! The token service only needs a narrow slice of the user store: lookups,
//! the current token version, and the two mutations that invalidate sessions.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use ch_core::repositories::UserRepository;
/// use ch_core::domain::entities::user::User;
/// use ch_core::errors::DomainError;
///
/// struct MySqlUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for MySqlUserRepository {
///     async fn find_by_id(&self, id: u64) -> Result<Option<User>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn find_by_email(&self, _: &str) -> Result<Option<User>, DomainError> { Ok(None) }
/// #   async fn current_token_version(&self, _: u64) -> Result<Option<u32>, DomainError> { Ok(None) }
/// #   async fn increment_token_version(&self, _: u64) -> Result<Option<u32>, DomainError> { Ok(None) }
/// #   async fn update_password_hash(&self, _: u64, _: &str) -> Result<bool, DomainError> { Ok(false) }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: u64) -> Result<Option<User>, DomainError>;

    /// Find a user by email; callers pass the normalized (trimmed, lowercase) form
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Current token version of a user, `None` when the user does not exist
    ///
    /// Called on every access token validation, so implementations should
    /// read the single column rather than the whole row.
    async fn current_token_version(&self, id: u64) -> Result<Option<u32>, DomainError>;

    /// Atomically increment the token version and return the new value
    ///
    /// # Returns
    /// * `Ok(Some(version))` - The version after the increment
    /// * `Ok(None)` - User not found
    /// * `Err(DomainError)` - Database error occurred
    async fn increment_token_version(&self, id: u64) -> Result<Option<u32>, DomainError>;

    /// Replace the stored password hash
    ///
    /// # Returns
    /// * `Ok(true)` - Hash updated
    /// * `Ok(false)` - User not found
    async fn update_password_hash(&self, id: u64, password_hash: &str) -> Result<bool, DomainError>;
}
