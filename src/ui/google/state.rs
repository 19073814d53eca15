use crate::auth::PendingAuthorization;
use crate::ui::form::{FormState, TextField};
use crate::ui::mvi::UiState;

/// Google sign-in progress.
///
/// ```text
/// Idle → AwaitingRedirect → TokenReceived → BackendLogin ─┬→ LoggedIn
///                                                          └→ Registering → Registered
/// ```
/// `Failed` is reachable from every non-terminal state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GoogleState {
    #[default]
    Idle,
    AwaitingRedirect {
        pending: PendingAuthorization,
        /// Where the user pastes the redirect URL or code.
        input: FormState,
    },
    TokenReceived,
    BackendLogin,
    Registering,
    LoggedIn,
    Registered,
    Failed {
        message: String,
    },
}

impl UiState for GoogleState {}

impl GoogleState {
    pub fn awaiting(pending: PendingAuthorization) -> Self {
        GoogleState::AwaitingRedirect {
            pending,
            input: FormState::new(vec![TextField::new("Redirect URL or code")]),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, GoogleState::LoggedIn | GoogleState::Registered)
    }

    /// Whether a network step is running.
    pub fn is_busy(&self) -> bool {
        match self {
            GoogleState::AwaitingRedirect { input, .. } => input.submitting,
            GoogleState::TokenReceived | GoogleState::BackendLogin | GoogleState::Registering => {
                true
            }
            _ => false,
        }
    }

    pub fn status_line(&self) -> &'static str {
        match self {
            GoogleState::Idle => "Preparing Google sign-in...",
            GoogleState::AwaitingRedirect { input, .. } if input.submitting => {
                "Exchanging authorization code..."
            }
            GoogleState::AwaitingRedirect { .. } => {
                "Open the link below, approve access, then paste the address you were redirected to."
            }
            GoogleState::TokenReceived => "Reading your Google profile...",
            GoogleState::BackendLogin => "Signing in...",
            GoogleState::Registering => "Creating your account...",
            GoogleState::LoggedIn | GoogleState::Registered => "Signed in.",
            GoogleState::Failed { .. } => "Google sign-in failed. Press r to try again.",
        }
    }
}
