//! Business services containing domain logic and use cases.

pub mod auth;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, CurrentUser, LoginOutcome};
pub use token::{
    CleanupResult, Clock, SystemClock, TokenCleanupConfig, TokenCleanupService, TokenService,
    TokenServiceConfig,
};

#[cfg(any(test, feature = "test-utils"))]
pub use token::ManualClock;
