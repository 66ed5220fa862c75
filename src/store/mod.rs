//! Credential lookup
//!
//! The authentication service only needs one query: find a user by exact
//! username. Implementations must bind the username as data. Building query
//! text from it is never acceptable, sanitized or not.

mod memory;
mod sql;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

use crate::models::User;

pub use memory::MemoryCredentialStore;
pub use sql::SqlCredentialStore;

/// Credential store failure
///
/// At the authentication boundary every variant is reported the same way as
/// an unknown user or a wrong password.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The lookup did not finish within the configured timeout
    #[error("Credential lookup timed out after {0:?}")]
    Timeout(Duration),

    /// Database operation failed
    #[error("Credential query failed: {0}")]
    Query(#[from] DbErr),

    /// A row came back but could not be turned into a user
    #[error("Malformed user record: {0}")]
    Decode(String),
}

/// Source of user records for authentication
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Exact-match lookup; `Ok(None)` when no user has this username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}

#[async_trait]
impl<T: CredentialStore + ?Sized> CredentialStore for Arc<T> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        (**self).find_by_username(username).await
    }
}
