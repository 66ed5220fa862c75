use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ValidationError;
use crate::security::Sanitizer;
use crate::store::{CredentialStore, StoreError};

/// Raw profile form as posted by the client
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// A submission that passed validation, both fields sanitized
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub username: String,
    pub email: String,
}

/// Result of [`SubmissionRequest::submit`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub submission: Submission,
    /// Whether a stored user has the sanitized username
    pub user_found: bool,
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SubmissionRequest {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            email: Some(email.into()),
        }
    }

    /// Sanitize both fields, then check the sanitized values
    pub fn validate(&self) -> Result<Submission, ValidationError> {
        let mut errors = ValidationError::new();

        let username = Sanitizer::sanitize_option(self.username.as_deref())
            .map(|username| username.into_owned())
            .unwrap_or_default();
        if username.is_empty() {
            errors.add("username", "Username is required.");
        }

        let email = Sanitizer::sanitize_option(self.email.as_deref())
            .map(|email| email.into_owned())
            .unwrap_or_default();
        if !Sanitizer::is_valid_email(&email) {
            errors.add("email", "Invalid email format.");
        }

        errors.into_result(Submission { username, email })
    }

    /// Validate, then look the sanitized username up in `store`
    #[tracing::instrument(skip(self, store))]
    pub async fn submit<S>(&self, store: &S) -> Result<SubmissionReceipt, SubmitError>
    where
        S: CredentialStore + ?Sized,
    {
        let submission = self.validate()?;
        let user_found = store.find_by_username(&submission.username).await?.is_some();

        tracing::debug!(user_found, "Submission processed");

        Ok(SubmissionReceipt {
            submission,
            user_found,
        })
    }
}
