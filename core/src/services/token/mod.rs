//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - HS256 access token issuance and validation against the user's token version
//! - Opaque refresh tokens with rotation on every use
//! - Revocation of single sessions and of every session of a user
//! - Background cleanup of expired refresh tokens

mod cleanup;
mod clock;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, TokenCleanupConfig, TokenCleanupService};
pub use clock::{Clock, SystemClock};
pub use config::TokenServiceConfig;
pub use service::TokenService;

#[cfg(any(test, feature = "test-utils"))]
pub use clock::ManualClock;
