//! bcrypt helpers
//!
//! Hashing runs on the blocking pool so a login does not stall the executor.
//! Hashes written by PHP (`$2y$`) verify the same as `$2b$` ones.

use tracing::warn;

use crate::errors::{DomainError, DomainResult};

/// Hash a password with the given bcrypt cost
pub async fn hash_password(password: &str, cost: u32) -> DomainResult<String> {
    let password = password.to_string();

    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Password hashing task failed: {}", e),
        })?
        .map_err(|e| DomainError::Internal {
            message: format!("Password hashing failed: {}", e),
        })
}

/// Check a password against a stored hash
///
/// An unparseable stored hash counts as a mismatch.
pub async fn verify_password(password: &str, password_hash: &str) -> DomainResult<bool> {
    let password = password.to_string();
    let password_hash = password_hash.to_string();

    let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Password verification task failed: {}", e),
        })?;

    match outcome {
        Ok(matches) => Ok(matches),
        Err(e) => {
            warn!(error = %e, "Stored password hash could not be parsed");
            Ok(false)
        }
    }
}
