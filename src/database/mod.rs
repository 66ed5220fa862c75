//! Database connection setup
//!
//! Builds a sea-orm connection from an explicit [`DatabaseConfig`]. The
//! connection string is assembled at call time from the configured endpoint
//! and credentials; there is no process-wide connection string.

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use crate::config::DatabaseConfig;

/// Open a pooled connection using the configured endpoint, credentials and
/// timeout
#[tracing::instrument(skip(config), fields(timeout = config.timeout, max_connections = config.max_connections))]
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.connection_url());
    options
        .max_connections(config.max_connections)
        .connect_timeout(config.timeout())
        .acquire_timeout(config.timeout())
        .sqlx_logging(false);

    match Database::connect(options).await {
        Ok(connection) => {
            tracing::info!("Connected to credential database");
            Ok(connection)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to credential database");
            Err(e)
        }
    }
}
