use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, QueryResult, Statement};
use uuid::Uuid;

use super::{CredentialStore, StoreError};
use crate::config::DatabaseConfig;
use crate::models::{Role, User};

/// Lookup text with a positional placeholder in the backend's syntax
fn find_by_username_sql(backend: DatabaseBackend) -> &'static str {
    match backend {
        DatabaseBackend::Postgres => {
            "SELECT id, username, email, password_hash, roles FROM users WHERE username = $1"
        }
        _ => "SELECT id, username, email, password_hash, roles FROM users WHERE username = ?",
    }
}

/// Credential store backed by the `users` table
///
/// The username travels as a bound statement value, so input like
/// `' OR 1=1 --` is compared literally and matches nobody.
pub struct SqlCredentialStore {
    db: DatabaseConnection,
    timeout: Duration,
}

impl SqlCredentialStore {
    pub fn new(db: DatabaseConnection, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    /// Connect with the endpoint, credentials and timeout from `config`
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let db = crate::database::connect(config).await?;
        Ok(Self::new(db, config.timeout()))
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn decode_user(row: &QueryResult) -> Result<User, StoreError> {
    let id: String = row.try_get("", "id")?;
    let id = Uuid::parse_str(&id).map_err(|e| StoreError::Decode(format!("id: {}", e)))?;
    let roles: String = row.try_get("", "roles")?;

    Ok(User {
        id,
        username: row.try_get("", "username")?,
        email: row.try_get("", "email")?,
        password_hash: row.try_get("", "password_hash")?,
        roles: Role::parse_list(&roles),
    })
}

#[async_trait]
impl CredentialStore for SqlCredentialStore {
    #[tracing::instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let backend = self.db.get_database_backend();
        let statement = Statement::from_sql_and_values(
            backend,
            find_by_username_sql(backend),
            [username.into()],
        );

        let row = match tokio::time::timeout(self.timeout, self.db.query_one(statement)).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::error!(timeout = ?self.timeout, "Credential lookup timed out");
                return Err(StoreError::Timeout(self.timeout));
            }
        };

        row.as_ref().map(decode_user).transpose()
    }
}
