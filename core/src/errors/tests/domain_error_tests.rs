//! Unit tests for domain error types

use crate::errors::{AuthError, DomainError, TokenError};

#[test]
fn test_token_error_bridges_into_domain_error() {
    let error: DomainError = TokenError::VersionMismatch.into();

    assert!(matches!(error, DomainError::Token(TokenError::VersionMismatch)));
    assert!(error.is_token_rejection());
    assert_eq!(error.to_string(), "Token version mismatch");
}

#[test]
fn test_auth_error_is_not_token_rejection() {
    let error: DomainError = AuthError::InvalidCredentials.into();

    assert!(!error.is_token_rejection());
    assert_eq!(error.to_string(), "Invalid email or password");
}

#[test]
fn test_weak_password_message_names_minimum() {
    let error = AuthError::WeakPassword { min_length: 8 };
    assert!(error.to_string().contains('8'));
}

#[test]
fn test_token_error_reasons_are_distinct() {
    let all = [
        TokenError::MalformedToken,
        TokenError::SignatureMismatch,
        TokenError::Expired,
        TokenError::VersionMismatch,
        TokenError::RefreshTokenNotFound,
        TokenError::RefreshTokenExpired,
        TokenError::UnknownSubject,
        TokenError::GenerationFailed,
    ];

    let mut reasons: Vec<_> = all.iter().map(|e| e.reason()).collect();
    reasons.sort_unstable();
    reasons.dedup();
    assert_eq!(reasons.len(), all.len());
}
