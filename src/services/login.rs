use thiserror::Error;

use super::authentication::AuthenticationService;
use super::session::SessionLayer;
use crate::models::Principal;
use crate::requests::{LoginRequest, ValidationError};
use crate::store::CredentialStore;

#[derive(Error, Debug)]
pub enum LoginError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Every rejection after validation, whatever the cause
    #[error("Invalid username or password.")]
    InvalidCredentials,
}

/// Login form handler: validate, authenticate, establish the session
///
/// `remember_me` selects a persistent session; when the form leaves it out
/// the configured default applies.
#[tracing::instrument(skip(service, sessions, request), fields(username = %request.username))]
pub async fn login<S: CredentialStore>(
    service: &AuthenticationService<S>,
    sessions: &dyn SessionLayer,
    request: LoginRequest,
) -> Result<Principal, LoginError> {
    request.validate()?;

    let Some(principal) = service.authenticate(&request.username, &request.password).await else {
        return Err(LoginError::InvalidCredentials);
    };

    let persistent = request
        .remember_me
        .unwrap_or_else(|| service.persistent_by_default());

    if let Err(e) = sessions.establish(&principal, persistent).await {
        tracing::error!(error = %e, user_id = %principal.user_id, "Failed to establish session");
        return Err(LoginError::InvalidCredentials);
    }

    Ok(principal)
}
