//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// Mock token repository for testing, keyed by session lineage
#[derive(Clone)]
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<Uuid, RefreshToken>>>,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored records, expired ones included
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }

    /// Whether a record with this hash is stored
    pub async fn contains_hash(&self, token_hash: &str) -> bool {
        self.tokens
            .read()
            .await
            .values()
            .any(|t| t.token_hash == token_hash)
    }

    /// Record stored for a session lineage
    pub async fn find_by_session(&self, session_id: Uuid) -> Option<RefreshToken> {
        self.tokens.read().await.get(&session_id).cloned()
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn save(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut tokens = self.tokens.write().await;

        // Check for duplicate hash in another session
        if tokens
            .values()
            .any(|t| t.token_hash == token.token_hash && t.session_id != token.session_id)
        {
            return Err(DomainError::Internal {
                message: "Duplicate refresh token hash".to_string(),
            });
        }

        tokens.insert(token.session_id, token.clone());
        Ok(token)
    }

    async fn find_and_consume(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        // Lookup and removal under one write lock
        let mut tokens = self.tokens.write().await;

        let session_id = tokens
            .values()
            .find(|t| t.token_hash == token_hash)
            .map(|t| t.session_id);

        Ok(session_id.and_then(|id| tokens.remove(&id)))
    }

    async fn delete_for_user(&self, user_id: u64) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let initial_count = tokens.len();

        tokens.retain(|_, token| token.user_id != user_id);

        Ok(initial_count - tokens.len())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let initial_count = tokens.len();

        tokens.retain(|_, token| !token.is_expired_at(now));

        Ok(initial_count - tokens.len())
    }

    async fn count_active_for_user(
        &self,
        user_id: u64,
        token_version: u32,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .values()
            .filter(|t| t.user_id == user_id && t.token_version == token_version && !t.is_expired_at(now))
            .count())
    }
}
