//! Username enumeration tests
//!
//! An unknown username and a wrong password must be indistinguishable to
//! the caller: same return value, same error message.

use safevault::models::Role;
use safevault::services::{LoginError, MemorySessions, login};
use safevault::store::MemoryCredentialStore;
use safevault::testing::setup;
use safevault::{AuthenticationService, LoginRequest};

fn service() -> AuthenticationService<MemoryCredentialStore> {
    let hasher = setup::password_hasher().unwrap();
    let alice = setup::user(&hasher, "alice", "correct horse", &[Role::USER]).unwrap();

    setup::authentication_service(MemoryCredentialStore::with_users([alice])).unwrap()
}

#[tokio::test]
async fn test_authenticate_outcomes_match() {
    let service = service();

    let wrong_password = service.authenticate("alice", "wrong").await;
    let unknown_user = service.authenticate("nobody", "wrong").await;
    let empty = service.authenticate("", "").await;

    assert!(wrong_password.is_none());
    assert_eq!(wrong_password, unknown_user);
    assert_eq!(unknown_user, empty);
}

#[tokio::test]
async fn test_login_messages_match() {
    let service = service();
    let sessions = MemorySessions::new();

    let wrong_password = login(&service, &sessions, LoginRequest::new("alice", "wrong"))
        .await
        .unwrap_err();
    let unknown_user = login(&service, &sessions, LoginRequest::new("nobody", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, LoginError::InvalidCredentials));
    assert!(matches!(unknown_user, LoginError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
}

#[tokio::test]
async fn test_usernames_are_case_sensitive() {
    let service = service();

    assert!(service.authenticate("Alice", "correct horse").await.is_none());
    assert!(service.authenticate("alice", "correct horse").await.is_some());
}
