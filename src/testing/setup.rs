use std::collections::BTreeSet;

use uuid::Uuid;

use crate::config::auth::{Argon2Config, AuthConfig};
use crate::models::{Role, User};
use crate::security::{HashError, PasswordHasher};
use crate::services::AuthenticationService;
use crate::store::{CredentialStore, MemoryCredentialStore};

/// Authentication settings with fast Argon2 parameters
///
/// Everything except the hash cost keeps its default, including the
/// one hour session lifetime and timing equalization.
///
/// # Test Parameters
/// - memory_cost: 8192 KB (8 MB instead of 64 MB)
/// - time_cost: 1 iteration (instead of 3)
/// - parallelism: 1 lane (instead of 4)
pub fn auth_config() -> AuthConfig {
    AuthConfig {
        argon2: Argon2Config {
            memory_cost: 8192,
            time_cost: 1,
            parallelism: 1,
            hash_length: 32,
            salt_length: 16,
        },
        ..Default::default()
    }
}

/// Returns a PasswordHasher configured with [`auth_config`]
///
/// # Example
/// ```no_run
/// use safevault::testing::setup;
///
/// let hasher = setup::password_hasher().unwrap();
/// let hash = hasher.hash("password").unwrap();
/// assert!(hasher.verify("password", &hash));
/// ```
pub fn password_hasher() -> Result<PasswordHasher, HashError> {
    PasswordHasher::from_config(&auth_config())
}

/// A user with a fresh id, `<username>@example.com` and the hash of
/// `password`
pub fn user(
    hasher: &PasswordHasher,
    username: &str,
    password: &str,
    roles: &[&str],
) -> Result<User, HashError> {
    Ok(User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password_hash: hasher.hash(password)?,
        roles: roles.iter().copied().map(Role::from).collect::<BTreeSet<_>>(),
    })
}

/// The demo accounts: `admin` (Admin) and `user` (User), each with the
/// password `password`
pub fn memory_store(hasher: &PasswordHasher) -> Result<MemoryCredentialStore, HashError> {
    Ok(MemoryCredentialStore::with_users([
        user(hasher, "admin", "password", &[Role::ADMIN])?,
        user(hasher, "user", "password", &[Role::USER])?,
    ]))
}

/// An authentication service over `store` using [`auth_config`]
pub fn authentication_service<S: CredentialStore>(
    store: S,
) -> Result<AuthenticationService<S>, HashError> {
    AuthenticationService::from_config(store, &auth_config())
}

/// Returns an in-memory SQLite database with all migrations applied
///
/// A single pooled connection keeps every query on the same in-memory
/// database. Each call returns a fresh, isolated database.
///
/// # Panics
/// Panics if the connection or a migration fails.
#[cfg(feature = "sqlite")]
pub async fn database() -> sea_orm::DatabaseConnection {
    use safevault_migration::MigratorTrait;
    use sea_orm::{ConnectOptions, Database};

    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to connect to in-memory database");

    safevault_migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Insert `user` into the `users` table
#[cfg(feature = "sqlite")]
pub async fn insert_user(
    db: &sea_orm::DatabaseConnection,
    user: &User,
) -> Result<(), sea_orm::DbErr> {
    use sea_orm::{ConnectionTrait, Statement};

    let statement = Statement::from_sql_and_values(
        db.get_database_backend(),
        "INSERT INTO users (id, username, email, password_hash, roles) VALUES (?, ?, ?, ?, ?)",
        [
            user.id.to_string().into(),
            user.username.as_str().into(),
            user.email.as_str().into(),
            user.password_hash.as_str().into(),
            Role::join_list(&user.roles).into(),
        ],
    );

    db.execute(statement).await?;
    Ok(())
}
