//! MySQL implementations of the core repository traits

pub mod token_repository_impl;
pub mod user_repository_impl;

pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;

use ch_core::errors::DomainError;

/// Wraps a sqlx failure as an internal domain error
pub(crate) fn query_error(context: &str, error: sqlx::Error) -> DomainError {
    tracing::error!("{}: {}", context, error);
    DomainError::Internal {
        message: format!("{}: {}", context, error),
    }
}

pub(crate) fn column_error(column: &str, error: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to get {}: {}", column, error),
    }
}
