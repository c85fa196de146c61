//! Shared fixtures for token service tests

mod cleanup_tests;

use std::sync::Arc;

use crate::domain::entities::user::{User, UserRole};
use crate::repositories::{MockTokenRepository, MockUserRepository};
use crate::services::token::{ManualClock, TokenService, TokenServiceConfig};

pub(super) const SECRET: &str = "unit-test-secret-that-is-long-enough-for-hs256";

pub(super) type TestTokenService = TokenService<MockUserRepository, MockTokenRepository, ManualClock>;

pub(super) struct Fixture {
    pub users: Arc<MockUserRepository>,
    pub tokens: Arc<MockTokenRepository>,
    pub clock: Arc<ManualClock>,
    pub service: TestTokenService,
}

pub(super) fn verified_client(id: u64) -> User {
    User::new(id, format!("user{}@example.com", id), "hash", UserRole::Client).verified()
}

pub(super) fn fixture_with(users: impl IntoIterator<Item = User>) -> Fixture {
    let users = Arc::new(MockUserRepository::with_users(users));
    let tokens = Arc::new(MockTokenRepository::new());
    let clock = Arc::new(ManualClock::starting_now());
    let service = TokenService::with_clock(
        Arc::clone(&users),
        Arc::clone(&tokens),
        Arc::clone(&clock),
        TokenServiceConfig::with_secret(SECRET),
    );

    Fixture {
        users,
        tokens,
        clock,
        service,
    }
}

/// Replace the character at `position` of segment `segment` with a different base64url character
pub(super) fn tamper(token: &str, segment: usize, position: usize) -> String {
    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    let mut chars: Vec<char> = parts[segment].chars().collect();
    chars[position] = if chars[position] == 'A' { 'B' } else { 'A' };
    parts[segment] = chars.into_iter().collect();
    parts.join(".")
}
