//! Unit tests for expired refresh token cleanup

use chrono::Duration;
use std::sync::Arc;

use super::{fixture_with, verified_client};
use crate::services::token::{TokenCleanupConfig, TokenCleanupService};

#[tokio::test]
async fn test_cleanup_expired_deletes_only_expired() {
    let user = verified_client(1);
    let fx = fixture_with([user.clone()]);
    fx.service.issue(&user).await.unwrap();

    fx.clock.advance(Duration::days(6));
    let recent = fx.service.issue(&user).await.unwrap();

    // First token is now past its seven days, the second is one day old
    fx.clock.advance(Duration::days(1));

    assert_eq!(fx.service.cleanup_expired().await.unwrap(), 1);
    assert_eq!(fx.tokens.len().await, 1);
    assert!(fx.service.refresh(&recent.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_cleanup_service_reports_deleted_count() {
    let user = verified_client(2);
    let fx = fixture_with([user.clone()]);
    fx.service.issue(&user).await.unwrap();
    fx.service.issue(&user).await.unwrap();
    fx.clock.advance(Duration::days(8));

    let tokens = Arc::clone(&fx.tokens);
    let cleanup = TokenCleanupService::new(Arc::new(fx.service), TokenCleanupConfig::default());
    let result = cleanup.run_cleanup().await.unwrap();

    assert!(result.is_success());
    assert_eq!(result.expired_tokens_deleted, 2);
    assert!(tokens.is_empty().await);
}

#[tokio::test]
async fn test_disabled_cleanup_does_nothing() {
    let user = verified_client(3);
    let fx = fixture_with([user.clone()]);
    fx.service.issue(&user).await.unwrap();
    fx.clock.advance(Duration::days(8));

    let tokens = Arc::clone(&fx.tokens);
    let config = TokenCleanupConfig {
        interval_seconds: 60,
        enabled: false,
    };
    let cleanup = Arc::new(TokenCleanupService::new(Arc::new(fx.service), config));

    let result = cleanup.run_cleanup().await.unwrap();
    assert_eq!(result.expired_tokens_deleted, 0);
    assert!(cleanup.start_background_task().is_none());
    assert_eq!(tokens.len().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_background_task_runs_cleanup() {
    let user = verified_client(4);
    let fx = fixture_with([user.clone()]);
    fx.service.issue(&user).await.unwrap();
    fx.clock.advance(Duration::days(8));

    let tokens = Arc::clone(&fx.tokens);
    let config = TokenCleanupConfig {
        interval_seconds: 60,
        enabled: true,
    };
    let cleanup = Arc::new(TokenCleanupService::new(Arc::new(fx.service), config));

    let handle = cleanup.start_background_task().unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    assert!(tokens.is_empty().await);
    handle.abort();
}
