//! Error types for authentication and token management
//!
//! Messages here are for server-side logs. The HTTP layer collapses every
//! `TokenError` into one generic response so callers cannot tell the reasons apart.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account not verified")]
    AccountNotVerified,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Password must be at least {min_length} characters")]
    WeakPassword { min_length: usize },
}

/// Token-related errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    MalformedToken,

    #[error("Token signature mismatch")]
    SignatureMismatch,

    #[error("Token expired")]
    Expired,

    #[error("Token version mismatch")]
    VersionMismatch,

    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Token subject unknown or not allowed to authenticate")]
    UnknownSubject,

    #[error("Token generation failed")]
    GenerationFailed,
}

impl TokenError {
    /// Short machine-friendly reason used as a log field
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::MalformedToken => "malformed",
            TokenError::SignatureMismatch => "signature_mismatch",
            TokenError::Expired => "expired",
            TokenError::VersionMismatch => "version_mismatch",
            TokenError::RefreshTokenNotFound => "refresh_not_found",
            TokenError::RefreshTokenExpired => "refresh_expired",
            TokenError::UnknownSubject => "unknown_subject",
            TokenError::GenerationFailed => "generation_failed",
        }
    }
}
