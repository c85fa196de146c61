//! Main authentication service implementation

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::{User, UserRole};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::token::{Clock, SystemClock, TokenService};

use super::config::AuthServiceConfig;
use super::password::{hash_password, verify_password};

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub tokens: TokenPair,
}

/// Profile of the authenticated user with their live session count
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub active_sessions: usize,
}

/// Authentication service for the account-level flows
pub struct AuthService<U, R, C = SystemClock>
where
    U: UserRepository,
    R: TokenRepository,
    C: Clock,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Token service for JWT management
    token_service: Arc<TokenService<U, R, C>>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, R, C> AuthService<U, R, C>
where
    U: UserRepository,
    R: TokenRepository,
    C: Clock,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `token_service` - Service for JWT token management
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<U, R, C>>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            config,
        }
    }

    pub fn token_service(&self) -> &Arc<TokenService<U, R, C>> {
        &self.token_service
    }

    /// Log in with email and password
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    /// `AccountNotVerified` is only reported once the password has matched.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<LoginOutcome> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::Validation {
                message: "Email and password are required".to_string(),
            });
        }

        let user = match self.user_repository.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                debug!("Login attempt for unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !verify_password(password, &user.password_hash).await? {
            debug!(user_id = user.id, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.verified {
            return Err(AuthError::AccountNotVerified.into());
        }

        let tokens = self.token_service.issue(&user).await?;
        info!(user_id = user.id, role = %user.role, "User logged in");

        Ok(LoginOutcome { user, tokens })
    }

    /// Exchange a refresh token for a new pair
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        self.token_service.refresh(refresh_token).await
    }

    /// End the session of a refresh token; unknown tokens are not an error
    pub async fn logout(&self, refresh_token: &str) -> DomainResult<bool> {
        self.token_service.revoke_refresh_token(refresh_token).await
    }

    /// End every session of a user and invalidate their access tokens
    pub async fn logout_everywhere(&self, user_id: u64) -> DomainResult<u32> {
        self.token_service.revoke_all(user_id).await
    }

    /// Change a password and return a fresh pair for the caller
    ///
    /// Every other session of the user is invalidated.
    pub async fn change_password(
        &self,
        user_id: u64,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<TokenPair> {
        if new_password.chars().count() < self.config.min_password_length {
            return Err(AuthError::WeakPassword {
                min_length: self.config.min_password_length,
            }
            .into());
        }

        let user = self.find_user(user_id).await?;

        if !verify_password(current_password, &user.password_hash).await? {
            debug!(user_id, "Password change with wrong current password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let new_hash = hash_password(new_password, self.config.bcrypt_cost).await?;
        if !self.user_repository.update_password_hash(user_id, &new_hash).await? {
            return Err(user_not_found(user_id));
        }

        self.token_service.revoke_all(user_id).await?;
        info!(user_id, "Password changed");

        let user = self.find_user(user_id).await?;
        self.token_service.issue(&user).await
    }

    /// Admin-initiated invalidation of every session of `target_user_id`
    pub async fn revoke_user_sessions(&self, actor_role: UserRole, target_user_id: u64) -> DomainResult<u32> {
        if actor_role != UserRole::Admin {
            warn!(target_user_id, "Non-admin attempted to revoke user sessions");
            return Err(AuthError::InsufficientPermissions.into());
        }

        self.token_service.revoke_all(target_user_id).await
    }

    /// Profile and live session count of a user
    pub async fn current_user(&self, user_id: u64) -> DomainResult<CurrentUser> {
        let user = self.find_user(user_id).await?;
        let active_sessions = self.token_service.active_sessions(user_id).await?;

        Ok(CurrentUser { user, active_sessions })
    }

    async fn find_user(&self, user_id: u64) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| user_not_found(user_id))
    }
}

fn user_not_found(user_id: u64) -> DomainError {
    DomainError::NotFound {
        resource: format!("User {}", user_id),
    }
}

/// Emails are matched trimmed and lowercase
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
