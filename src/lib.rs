pub mod config;
pub mod database;
pub mod metrics;
pub mod models;
pub mod requests;
pub mod security;
pub mod services;
pub mod store;

// Testing utilities (always available for integration tests)
pub mod testing;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use models::{Principal, Role, User};
pub use requests::{LoginRequest, SubmissionRequest, ValidationError};
pub use security::{PasswordHasher, Sanitizer};
pub use services::{AuthenticationService, AuthorizationModel, Decision, LoginError, MemorySessions, SessionLayer};
pub use store::{CredentialStore, MemoryCredentialStore, SqlCredentialStore, StoreError};
