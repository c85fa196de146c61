//! Unit tests for token entities

use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshToken, TokenPair, TOKEN_TYPE};
use crate::domain::entities::user::{User, UserRole};

#[test]
fn test_claims_from_user() {
    let mut user = User::new(42, "client@example.com", "hash", UserRole::Client);
    user.token_version = 3;
    let issued_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    let claims = Claims::new(&user, issued_at, Duration::seconds(900));

    assert_eq!(claims.sub, 42);
    assert_eq!(claims.role, UserRole::Client);
    assert_eq!(claims.ver, 3);
    assert_eq!(claims.iat, issued_at.timestamp());
    assert_eq!(claims.exp - claims.iat, 900);
    assert_eq!(claims.user_id(), 42);
}

#[test]
fn test_claims_serialized_field_order() {
    let user = User::new(42, "client@example.com", "hash", UserRole::Client);
    let issued_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let claims = Claims::new(&user, issued_at, Duration::seconds(900));

    let json = serde_json::to_string(&claims).unwrap();

    assert_eq!(
        json,
        r#"{"sub":42,"role":"client","ver":0,"iat":1700000000,"exp":1700000900}"#
    );
}

#[test]
fn test_claims_expire_at_exp_second() {
    let user = User::new(1, "a@example.com", "hash", UserRole::Admin);
    let issued_at = Utc.timestamp_opt(1_000, 0).unwrap();
    let claims = Claims::new(&user, issued_at, Duration::seconds(60));

    assert!(!claims.is_expired_at(issued_at + Duration::seconds(59)));
    assert!(claims.is_expired_at(issued_at + Duration::seconds(60)));
    assert!(claims.is_expired_at(issued_at + Duration::seconds(61)));
}

#[test]
fn test_refresh_token_expiry() {
    let mut user = User::new(9, "i@example.com", "hash", UserRole::Client);
    user.token_version = 2;
    let now = Utc::now();
    let token = RefreshToken::new(&user, Uuid::new_v4(), "hash".to_string(), now, Duration::days(7));

    assert_eq!(token.user_id, 9);
    assert_eq!(token.token_version, 2);
    assert_eq!(token.expires_at, now + Duration::days(7));
    assert!(!token.is_expired_at(now));
    assert!(token.is_expired_at(now + Duration::days(7)));
    assert_eq!(token.time_until_expiration(now), Duration::days(7));
    assert_eq!(token.time_until_expiration(now + Duration::days(8)), Duration::zero());
}

#[test]
fn test_token_pair_creation() {
    let pair = TokenPair::new("access".to_string(), "refresh".to_string(), 900, 604800);

    assert_eq!(pair.token_type, TOKEN_TYPE);
    assert_eq!(pair.expires_in, 900);
    assert_eq!(pair.refresh_expires_in, 604800);
}
