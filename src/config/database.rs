use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{ConfigError, Validate};

/// Connection settings for the credential store
///
/// Passed explicitly to [`crate::store::SqlCredentialStore::connect`];
/// nothing here is held as global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL without credentials (e.g. `postgres://db:5432/safevault`)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Login for the endpoint, spliced into the URL at connect time
    #[serde(default)]
    pub credentials: Option<DatabaseCredentials>,
    /// Connect and query timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Upper bound on pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for DatabaseCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn default_endpoint() -> String {
    "sqlite::memory:".to_string()
}

fn default_timeout() -> u64 {
    5
}

fn default_max_connections() -> u32 {
    10
}

impl DatabaseConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Endpoint with credentials, percent-encoded, inserted after the scheme
    pub fn connection_url(&self) -> String {
        match (&self.credentials, self.endpoint.split_once("://")) {
            (Some(credentials), Some((scheme, rest))) => format!(
                "{}://{}:{}@{}",
                scheme,
                urlencoding::encode(&credentials.username),
                urlencoding::encode(&credentials.password),
                rest
            ),
            _ => self.endpoint.clone(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            credentials: None,
            timeout: default_timeout(),
            max_connections: default_max_connections(),
        }
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.is_empty() {
            return Err(ConfigError::ValidationError("database.endpoint cannot be empty".to_string()));
        }
        if self.timeout == 0 {
            return Err(ConfigError::ValidationError("database.timeout must be > 0".to_string()));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::ValidationError("database.max_connections must be > 0".to_string()));
        }
        if let Some(credentials) = &self.credentials {
            if credentials.username.is_empty() {
                return Err(ConfigError::ValidationError(
                    "database.credentials.username cannot be empty".to_string(),
                ));
            }
            if !self.endpoint.contains("://") {
                return Err(ConfigError::ValidationError(
                    "database.credentials require an endpoint of the form scheme://host".to_string(),
                ));
            }
        }
        Ok(())
    }
}
