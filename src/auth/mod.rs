//! Google sign-in against the vocabulary backend.

mod error;
mod google;

pub use error::GoogleAuthError;
pub use google::{parse_redirect, GoogleOAuth, GoogleProfile, PendingAuthorization};

use crate::api::{ApiError, Registration, ServerErrorKind, UserId, VocabApi};

/// Security question and answer recorded for Google-created accounts.
pub const GOOGLE_SECURITY_PLACEHOLDER: &str = "Google";

/// Progress through the backend half of Google sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoogleStep {
    BackendLogin,
    Registering,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleSignIn {
    pub user_id: UserId,
    /// True when the account was created by this sign-in.
    pub registered: bool,
}

/// Backend password derived from the Google account id.
pub fn google_password(profile: &GoogleProfile) -> String {
    format!("google:{}", profile.id)
}

/// Log a Google user into the backend, registering them first when the
/// backend does not know the email.
///
/// Only a `NotFound` error kind triggers registration; every other failure
/// is returned.
pub async fn sign_in_with_google(
    api: &VocabApi,
    profile: &GoogleProfile,
    mut progress: impl FnMut(GoogleStep),
) -> Result<GoogleSignIn, GoogleAuthError> {
    let password = google_password(profile);

    progress(GoogleStep::BackendLogin);
    match api.login(&profile.email, &password).await {
        Ok(user_id) => {
            return Ok(GoogleSignIn {
                user_id,
                registered: false,
            })
        }
        Err(err) if err.kind() == Some(ServerErrorKind::NotFound) => {
            tracing::info!(email = %profile.email, "unknown google user, registering");
        }
        Err(err) => return Err(err.into()),
    }

    progress(GoogleStep::Registering);
    let registration = google_registration(profile);
    let user_id = match api.register(&registration).await? {
        Some(id) => id,
        None => match api.login(&profile.email, &password).await {
            Ok(id) => id,
            Err(ApiError::Server { .. }) => return Err(GoogleAuthError::MissingUserId),
            Err(err) => return Err(err.into()),
        },
    };

    Ok(GoogleSignIn {
        user_id,
        registered: true,
    })
}

pub fn google_registration(profile: &GoogleProfile) -> Registration {
    Registration {
        email: profile.email.trim().to_string(),
        password: google_password(profile),
        security_question: GOOGLE_SECURITY_PLACEHOLDER.to_string(),
        security_answer: GOOGLE_SECURITY_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_uses_placeholders() {
        let profile = GoogleProfile {
            id: "1099".to_string(),
            email: " new@example.com ".to_string(),
            name: None,
        };
        let registration = google_registration(&profile);
        assert_eq!(registration.email, "new@example.com");
        assert_eq!(registration.password, "google:1099");
        assert_eq!(registration.security_question, "Google");
        assert_eq!(registration.security_answer, "Google");
    }
}
