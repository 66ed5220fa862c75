use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use super::session::SessionLayer;
use crate::config::auth::AuthConfig;
use crate::metrics::AuthMetrics;
use crate::models::{Principal, User};
use crate::security::{HashError, PasswordHasher};
use crate::store::CredentialStore;

/// Why a credential check was rejected
///
/// Only logs and metrics see this. Every variant looks the same to the
/// caller of [`AuthenticationService`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureReason {
    UserNotFound,
    BadPassword,
    StoreUnavailable,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::UserNotFound => "user_not_found",
            FailureReason::BadPassword => "bad_password",
            FailureReason::StoreUnavailable => "store_unavailable",
        }
    }
}

#[derive(Debug)]
pub(crate) enum CredentialCheck {
    Success(User),
    Failure(FailureReason),
}

/// Username/password verification against a credential store
///
/// Each attempt goes LOOKUP -> VERIFY -> signed in or rejected. The store is
/// asked once, never retried. Hash verification runs on the blocking thread
/// pool. When timing equalization is on, a lookup miss or store failure
/// still pays for one verification against a decoy hash.
pub struct AuthenticationService<S> {
    store: S,
    hasher: Arc<PasswordHasher>,
    decoy_hash: Option<String>,
    session_lifetime: Duration,
    persistent_by_default: bool,
    metrics: AuthMetrics,
    #[cfg(test)]
    verifications: std::sync::atomic::AtomicUsize,
}

impl<S: CredentialStore> AuthenticationService<S> {
    /// Build the service; computes the decoy hash up front when
    /// `equalize_timing` is enabled
    pub fn new(store: S, hasher: PasswordHasher, config: &AuthConfig) -> Result<Self, HashError> {
        let decoy_hash = if config.equalize_timing {
            Some(hasher.hash(&Uuid::new_v4().to_string())?)
        } else {
            None
        };

        Ok(Self {
            store,
            hasher: Arc::new(hasher),
            decoy_hash,
            session_lifetime: config.session.lifetime(),
            persistent_by_default: config.session.persistent,
            metrics: AuthMetrics::new(),
            #[cfg(test)]
            verifications: std::sync::atomic::AtomicUsize::new(0),
        })
    }

    pub fn from_config(store: S, config: &AuthConfig) -> Result<Self, HashError> {
        let hasher = PasswordHasher::from_config(config)?;
        Self::new(store, hasher, config)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    pub fn persistent_by_default(&self) -> bool {
        self.persistent_by_default
    }

    async fn verify(&self, password: &str, hash: &str) -> bool {
        #[cfg(test)]
        self.verifications
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);

        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        let hash = hash.to_owned();

        match tokio::task::spawn_blocking(move || hasher.verify(&password, &hash)).await {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!(error = %e, "Password verification task failed");
                false
            }
        }
    }

    async fn verify_decoy(&self, password: &str) {
        if let Some(decoy_hash) = &self.decoy_hash {
            self.verify(password, decoy_hash).await;
        }
    }

    #[tracing::instrument(skip(self, password))]
    pub(crate) async fn check_credentials(&self, username: &str, password: &str) -> CredentialCheck {
        let user = match self.store.find_by_username(username).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                self.verify_decoy(password).await;
                return CredentialCheck::Failure(FailureReason::UserNotFound);
            }
            Err(e) => {
                tracing::error!(error = %e, "Credential store unavailable");
                self.verify_decoy(password).await;
                return CredentialCheck::Failure(FailureReason::StoreUnavailable);
            }
        };

        if !self.verify(password, &user.password_hash).await {
            return CredentialCheck::Failure(FailureReason::BadPassword);
        }

        if let Ok(true) = self.hasher.needs_rehash(&user.password_hash) {
            tracing::info!(user_id = %user.id, "Stored password hash uses outdated parameters");
        }

        CredentialCheck::Success(user)
    }

    /// Verify credentials and build the principal for a new session
    ///
    /// Returns `None` for an unknown user, a wrong password and an
    /// unreachable store alike.
    #[tracing::instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Option<Principal> {
        match self.check_credentials(username, password).await {
            CredentialCheck::Success(user) => {
                self.metrics.record_login_attempt(true);
                tracing::info!(user_id = %user.id, "Credentials verified");

                Some(Principal::for_user(&user, self.session_lifetime))
            }
            CredentialCheck::Failure(reason) => {
                self.metrics.record_login_attempt(false);
                self.metrics.record_login_failure(reason);
                tracing::warn!(reason = reason.as_str(), "Login rejected");

                None
            }
        }
    }

    pub async fn is_authenticated(&self, username: &str, password: &str) -> bool {
        self.authenticate(username, password).await.is_some()
    }

    /// Authenticate, then ask `sessions` to establish a session
    ///
    /// `true` only when both steps succeed.
    pub async fn sign_in(
        &self,
        sessions: &dyn SessionLayer,
        username: &str,
        password: &str,
        persistent: bool,
    ) -> bool {
        let Some(principal) = self.authenticate(username, password).await else {
            return false;
        };

        match sessions.establish(&principal, persistent).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, user_id = %principal.user_id, "Failed to establish session");
                false
            }
        }
    }
}
