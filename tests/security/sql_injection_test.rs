//! SQL injection tests against the `users` table
//!
//! Each test verifies that:
//! 1. The lookup completes without a SQL error
//! 2. The payload is compared as a literal username and matches nobody
//! 3. The table is intact afterwards

use std::time::Duration;

use safevault::models::Role;
use safevault::store::{CredentialStore, SqlCredentialStore};
use safevault::testing::setup;

const PAYLOADS: &[&str] = &[
    "' OR '1'='1",
    "' OR 1=1 --",
    "admin' --",
    "admin'/*",
    "admin'; DROP TABLE users; --",
    "\" OR \"\"=\"",
    "' UNION SELECT id, username, email, password_hash, roles FROM users --",
];

async fn seeded_store() -> SqlCredentialStore {
    let db = setup::database().await;
    let hasher = setup::password_hasher().unwrap();

    for user in [
        setup::user(&hasher, "admin", "password", &[Role::ADMIN]).unwrap(),
        setup::user(&hasher, "user", "password", &[Role::USER]).unwrap(),
    ] {
        setup::insert_user(&db, &user).await.unwrap();
    }

    SqlCredentialStore::new(db, Duration::from_secs(5))
}

#[tokio::test]
async fn test_injection_payloads_match_nobody() {
    let store = seeded_store().await;

    for payload in PAYLOADS {
        let result = store.find_by_username(payload).await;

        assert!(
            matches!(result, Ok(None)),
            "payload {:?} returned {:?}",
            payload,
            result
        );
    }
}

#[tokio::test]
async fn test_table_intact_after_injection_attempts() {
    let store = seeded_store().await;

    for payload in PAYLOADS {
        let _ = store.find_by_username(payload).await;
    }

    let admin = store.find_by_username("admin").await.unwrap().unwrap();
    assert!(admin.has_role(Role::ADMIN));
    assert!(store.find_by_username("user").await.unwrap().is_some());
}

#[tokio::test]
async fn test_injection_payloads_do_not_authenticate() {
    let store = seeded_store().await;
    let service = setup::authentication_service(store).unwrap();

    for payload in PAYLOADS {
        assert!(service.authenticate(payload, "password").await.is_none());
        assert!(service.authenticate("admin", payload).await.is_none());
    }

    assert!(service.authenticate("admin", "password").await.is_some());
}

#[tokio::test]
async fn test_quotes_in_stored_username_match_literally() {
    let db = setup::database().await;
    let hasher = setup::password_hasher().unwrap();
    let user = setup::user(&hasher, "o'brien", "password", &[Role::USER]).unwrap();
    setup::insert_user(&db, &user).await.unwrap();

    let store = SqlCredentialStore::new(db, Duration::from_secs(5));

    let found = store.find_by_username("o'brien").await.unwrap().unwrap();
    assert_eq!(found.id, user.id);
    assert!(store.find_by_username("obrien").await.unwrap().is_none());
}
