//! Shared fixtures for the HTTP tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{test, web};
use serde_json::json;

use ch_api::AppState;
use ch_core::domain::entities::user::{User, UserRole};
use ch_core::repositories::{MockTokenRepository, MockUserRepository};
use ch_core::services::auth::{hash_password, AuthService, AuthServiceConfig};
use ch_core::services::token::{ManualClock, TokenService, TokenServiceConfig};
use ch_shared::config::SessionConfig;

pub const PASSWORD: &str = "correct horse battery";
pub const ADMIN_EMAIL: &str = "admin@charterhub.test";
pub const CLIENT_EMAIL: &str = "client@charterhub.test";
pub const PENDING_EMAIL: &str = "pending@charterhub.test";

pub type TestState = AppState<MockUserRepository, MockTokenRepository, ManualClock>;

pub struct TestContext {
    pub users: Arc<MockUserRepository>,
    pub tokens: Arc<MockTokenRepository>,
    pub clock: Arc<ManualClock>,
    pub state: web::Data<TestState>,
}

/// Admin (1), verified client (2) and unverified client (3)
pub async fn context() -> TestContext {
    let hash = hash_password(PASSWORD, 4).await.unwrap();
    let users = Arc::new(MockUserRepository::with_users(vec![
        User::new(1, ADMIN_EMAIL, hash.clone(), UserRole::Admin).verified(),
        User::new(2, CLIENT_EMAIL, hash.clone(), UserRole::Client)
            .with_name("Grace", "Hopper")
            .verified(),
        User::new(3, PENDING_EMAIL, hash, UserRole::Client),
    ]));
    let tokens = Arc::new(MockTokenRepository::new());
    let clock = Arc::new(ManualClock::starting_now());

    let token_service = Arc::new(TokenService::with_clock(
        Arc::clone(&users),
        Arc::clone(&tokens),
        Arc::clone(&clock),
        TokenServiceConfig::with_secret("http-test-secret-0123456789abcdef"),
    ));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&users),
        token_service,
        AuthServiceConfig {
            bcrypt_cost: 4,
            min_password_length: 8,
        },
    ));

    TestContext {
        users,
        tokens,
        clock,
        state: web::Data::new(AppState::new(auth_service, SessionConfig::default())),
    }
}

pub fn login_request(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": email, "password": password }))
}

pub fn refresh_request(refresh_token: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/auth/refresh")
        .set_json(json!({ "refresh_token": refresh_token }))
}

pub fn bearer(access_token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", access_token))
}
