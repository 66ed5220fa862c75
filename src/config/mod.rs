pub mod app;
pub mod auth;
pub mod database;
pub mod security;

use thiserror::Error;

// Export config sections
pub use app::{AppConfig, AppMetadata};
pub use auth::{Argon2Config, AuthConfig, SessionConfig};
pub use database::{DatabaseConfig, DatabaseCredentials};
pub use security::{RuleConfig, SecurityConfig};

/// Configuration loading or validation failure
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Source(#[from] ::config::ConfigError),

    /// A value was read but is not acceptable
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Semantic checks run after deserialization
pub trait Validate {
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Load the application configuration from files and environment variables
pub fn load() -> Result<AppConfig, ConfigError> {
    app::load_config()
}
