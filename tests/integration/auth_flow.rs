//! End-to-end login flow: credentials in, gated resources out

use safevault::config::SecurityConfig;
use safevault::services::{AuthorizationModel, Decision, MemorySessions, login};
use safevault::store::MemoryCredentialStore;
use safevault::testing::setup;
use safevault::LoginRequest;

fn service() -> safevault::AuthenticationService<MemoryCredentialStore> {
    let hasher = setup::password_hasher().unwrap();
    let store = setup::memory_store(&hasher).unwrap();

    setup::authentication_service(store).unwrap()
}

#[tokio::test]
async fn test_admin_login_reaches_dashboard() {
    let service = service();
    let sessions = MemorySessions::new();
    let model = AuthorizationModel::from_config(&SecurityConfig::default());

    let principal = login(&service, &sessions, LoginRequest::new("admin", "password"))
        .await
        .unwrap();
    let session = sessions.current(principal.user_id).unwrap();

    assert_eq!(model.authorize(Some(&session.principal), "/dashboard"), Decision::Allow);
    assert_eq!(model.authorize(Some(&session.principal), "/tools"), Decision::Allow);
    assert_eq!(model.authorize(Some(&session.principal), "/profile"), Decision::Allow);
}

#[tokio::test]
async fn test_user_login_is_kept_out_of_dashboard() {
    let service = service();
    let sessions = MemorySessions::new();
    let model = AuthorizationModel::from_config(&SecurityConfig::default());

    let principal = login(&service, &sessions, LoginRequest::new("user", "password"))
        .await
        .unwrap();

    assert_eq!(model.authorize(Some(&principal), "/dashboard"), Decision::Deny);
    assert_eq!(model.authorize(Some(&principal), "/tools"), Decision::Allow);
}

#[tokio::test]
async fn test_logout_ends_access() {
    let service = service();
    let sessions = MemorySessions::new();
    let model = AuthorizationModel::from_config(&SecurityConfig::default());

    let principal = login(&service, &sessions, LoginRequest::new("user", "password"))
        .await
        .unwrap();
    assert!(sessions.end(principal.user_id));

    let current = sessions.current(principal.user_id);
    assert_eq!(model.authorize(current.as_ref().map(|s| &s.principal), "/profile"), Decision::Deny);
}

#[tokio::test]
async fn test_failed_login_leaves_anonymous() {
    let service = service();
    let sessions = MemorySessions::new();

    assert!(!service.sign_in(&sessions, "admin", "wrong", false).await);
    assert!(sessions.is_empty());
}

#[cfg(feature = "sqlite")]
mod sqlite {
    use std::time::Duration;

    use safevault::config::SecurityConfig;
    use safevault::models::Role;
    use safevault::services::{AuthorizationModel, Decision, MemorySessions, login};
    use safevault::store::{CredentialStore, SqlCredentialStore};
    use safevault::testing::setup;
    use safevault::LoginRequest;

    #[tokio::test]
    async fn test_login_against_database() {
        let db = setup::database().await;
        let hasher = setup::password_hasher().unwrap();
        let admin = setup::user(&hasher, "admin", "password", &[Role::ADMIN, Role::USER]).unwrap();
        setup::insert_user(&db, &admin).await.unwrap();

        let store = SqlCredentialStore::new(db, Duration::from_secs(5));
        let stored = store.find_by_username("admin").await.unwrap().unwrap();
        assert_eq!(stored, admin);

        let service = setup::authentication_service(store).unwrap();
        let sessions = MemorySessions::new();
        let model = AuthorizationModel::from_config(&SecurityConfig::default());

        let principal = login(&service, &sessions, LoginRequest::new("admin", "password"))
            .await
            .unwrap();

        assert_eq!(principal.user_id, admin.id);
        assert_eq!(model.authorize(Some(&principal), "/dashboard"), Decision::Allow);
    }
}
