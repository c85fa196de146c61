//! Unit tests for mock user repository implementation

use crate::domain::entities::user::{User, UserRole};
use crate::repositories::user::{MockUserRepository, UserRepository};

fn sample_user(id: u64, email: &str) -> User {
    User::new(id, email, "hash", UserRole::Client).verified()
}

#[tokio::test]
async fn test_find_by_id_and_email() {
    let repo = MockUserRepository::with_users([sample_user(1, "skipper@example.com")]);

    let by_id = repo.find_by_id(1).await.unwrap();
    assert_eq!(by_id.unwrap().email, "skipper@example.com");

    let by_email = repo.find_by_email("SKIPPER@example.com").await.unwrap();
    assert_eq!(by_email.unwrap().id, 1);

    assert!(repo.find_by_id(2).await.unwrap().is_none());
    assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_increment_token_version() {
    let repo = MockUserRepository::with_users([sample_user(5, "e@example.com")]);

    assert_eq!(repo.current_token_version(5).await.unwrap(), Some(0));
    assert_eq!(repo.increment_token_version(5).await.unwrap(), Some(1));
    assert_eq!(repo.increment_token_version(5).await.unwrap(), Some(2));
    assert_eq!(repo.current_token_version(5).await.unwrap(), Some(2));
}

#[tokio::test]
async fn test_missing_user_version_operations() {
    let repo = MockUserRepository::new();

    assert_eq!(repo.current_token_version(99).await.unwrap(), None);
    assert_eq!(repo.increment_token_version(99).await.unwrap(), None);
    assert!(!repo.update_password_hash(99, "new").await.unwrap());
}

#[tokio::test]
async fn test_update_password_hash() {
    let repo = MockUserRepository::with_users([sample_user(8, "h@example.com")]);

    assert!(repo.update_password_hash(8, "new-hash").await.unwrap());
    let user = repo.find_by_id(8).await.unwrap().unwrap();
    assert_eq!(user.password_hash, "new-hash");
}

#[tokio::test]
async fn test_remove_user() {
    let repo = MockUserRepository::with_users([sample_user(3, "c@example.com")]);

    assert!(repo.remove(3).await.is_some());
    assert!(repo.find_by_id(3).await.unwrap().is_none());
}
