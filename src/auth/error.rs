use thiserror::Error;

use crate::api::ApiError;

/// Errors of the Google sign-in flow.
#[derive(Debug, Error)]
pub enum GoogleAuthError {
    #[error("Google sign-in is not configured (set google.client_id)")]
    NotConfigured,

    #[error("Invalid Google {field}: {reason}")]
    InvalidUrl { field: &'static str, reason: String },

    #[error("Google sign-in was denied: {reason}")]
    Denied { reason: String },

    #[error("The pasted redirect does not belong to this sign-in attempt")]
    StateMismatch,

    #[error("No authorization code found in the pasted text")]
    MissingCode,

    #[error("Could not reach Google: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Google rejected the authorization code: {reason}")]
    CodeRejected { reason: String },

    #[error("Google rejected the request ({status}): {body}")]
    TokenRejected { status: u16, body: String },

    #[error("Unexpected response from Google: {0}")]
    Malformed(String),

    #[error(transparent)]
    Backend(#[from] ApiError),

    #[error("Registration succeeded but no user id could be obtained")]
    MissingUserId,
}

impl GoogleAuthError {
    pub(crate) fn invalid_url(field: &'static str, err: impl std::fmt::Display) -> Self {
        GoogleAuthError::InvalidUrl {
            field,
            reason: err.to_string(),
        }
    }

    /// Text for the alert shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            GoogleAuthError::Backend(err) => err.user_message("Google sign-in failed"),
            other => other.to_string(),
        }
    }
}
