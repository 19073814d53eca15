//! Side effects requested by the UI.
//!
//! The UI thread never blocks on the network. It sends a [`UiCommand`]
//! tagged with the generation of the screen that issued it; the worker runs
//! each command on its own task and posts one or more [`EffectOutcome`]s
//! back through the UI event channel with the same tag.

use std::sync::mpsc as std_mpsc;

use tokio::sync::mpsc;

use crate::api::{
    ApiError, DailyWord, DeleteListOutcome, ListId, ListWords, Registration, UserId, VocabApi,
    VocabList,
};
use crate::auth::{
    parse_redirect, sign_in_with_google, GoogleAuthError, GoogleOAuth, GoogleStep,
    PendingAuthorization,
};
use crate::session::{AuthProvider, Identity, Session};
use crate::store::{LocalAuthStore, StoreError};
use crate::ui::events::AppEvent;

const LISTS_FALLBACK: &str =
    "Failed to load vocab lists. Please check your connection and try again.";
const WORDS_FALLBACK: &str = "Failed to load words. Please check your connection and try again.";
const SAVE_WORD_FALLBACK: &str = "Failed to save word";
const CREATE_LIST_FALLBACK: &str = "Failed to create list";
const DELETE_CONNECTION: &str = "Could not delete list. Check your connection and try again.";
const GENERIC_FALLBACK: &str = "An error occurred";
const RESET_FALLBACK: &str = "Failed to reset password";
const RESET_UNAVAILABLE: &str =
    "Password reset is unavailable: the local account store is not open.";
const UNKNOWN_EMAIL: &str = "No account found for that email.";

#[derive(Debug, Clone)]
pub enum UiCommand {
    LoadDailyWord,
    LoadHistoryList,
    SaveToHistory {
        list_id: ListId,
        word: String,
        definition: String,
    },
    LoadPickableLists,
    LoadAllLists,
    SaveWord {
        list: VocabList,
        word: String,
        definition: String,
    },
    CreateList {
        name: String,
    },
    LoadWords {
        list_id: ListId,
    },
    DeleteList {
        list_id: ListId,
    },
    Login {
        email: String,
        password: String,
    },
    Register(Registration),
    LookupSecurityQuestion {
        email: String,
    },
    VerifySecurityAnswer {
        email: String,
        answer: String,
    },
    ResetPassword {
        email: String,
        new_password: String,
    },
    BeginGoogle,
    CompleteGoogle {
        pending: PendingAuthorization,
        redirect: String,
    },
}

#[derive(Debug, Clone)]
pub struct TaggedCommand {
    pub generation: u64,
    pub command: UiCommand,
}

pub type UiCommandSender = mpsc::Sender<TaggedCommand>;
pub type UiCommandReceiver = mpsc::Receiver<TaggedCommand>;

pub fn command_channel() -> (UiCommandSender, UiCommandReceiver) {
    mpsc::channel(64)
}

/// A failed effect, already reduced to what the alert shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// The request never reached the server.
    pub connection: bool,
    pub message: String,
}

impl Failure {
    pub fn from_api(err: &ApiError, fallback: &str) -> Self {
        Self {
            connection: err.is_transport(),
            message: err.user_message(fallback),
        }
    }

    pub fn local(message: impl Into<String>) -> Self {
        Self {
            connection: false,
            message: message.into(),
        }
    }

    pub fn title<'a>(&self, screen_title: &'a str) -> &'a str {
        if self.connection {
            "Connection Error"
        } else {
            screen_title
        }
    }
}

#[derive(Debug, Clone)]
pub enum EffectOutcome {
    DailyWord(DailyWord),
    HistoryList(Result<Option<ListId>, Failure>),
    SavedToHistory(Result<(), Failure>),
    PickableLists(Result<Vec<VocabList>, Failure>),
    AllLists(Result<Vec<VocabList>, Failure>),
    WordSaved {
        list_name: String,
        result: Result<(), Failure>,
    },
    ListCreated(Result<(), Failure>),
    Words(Result<ListWords, Failure>),
    ListDeleted(Result<DeleteListOutcome, Failure>),
    /// Applied to the session by the UI, so a stale result signs nobody in.
    LoggedIn(Result<Identity, Failure>),
    Registered(Result<(), Failure>),
    SecurityQuestion {
        email: String,
        result: Result<String, Failure>,
    },
    AnswerChecked {
        email: String,
        result: Result<bool, Failure>,
    },
    PasswordReset(Result<(), Failure>),
    GoogleReady(Result<PendingAuthorization, Failure>),
    GoogleTokenReceived,
    GoogleStep(GoogleStep),
    GoogleFinished(Result<GoogleAccount, Failure>),
    /// The command needs a user but the session is empty.
    NotSignedIn,
}

/// A finished Google sign-in, not yet applied to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleAccount {
    pub identity: Identity,
    /// True when the backend account was created by this sign-in.
    pub registered: bool,
}

/// Everything an effect may touch.
#[derive(Clone)]
pub struct Services {
    pub api: VocabApi,
    pub session: Session,
    pub store: Option<LocalAuthStore>,
    pub google: Option<GoogleOAuth>,
}

/// Receive commands until the UI drops its sender.
pub async fn run_worker(
    services: Services,
    mut commands: UiCommandReceiver,
    events: std_mpsc::Sender<AppEvent>,
) {
    while let Some(TaggedCommand {
        generation,
        command,
    }) = commands.recv().await
    {
        let services = services.clone();
        let events = events.clone();
        tokio::spawn(async move {
            execute(&services, command, move |outcome| {
                let _ = events.send(AppEvent::Effect {
                    generation,
                    outcome,
                });
            })
            .await;
        });
    }
    tracing::debug!("command channel closed, effects worker exiting");
}

/// Run one command, reporting every outcome through `emit`.
pub async fn execute(
    services: &Services,
    command: UiCommand,
    mut emit: impl FnMut(EffectOutcome) + Send,
) {
    let api = &services.api;
    match command {
        UiCommand::LoadDailyWord => emit(EffectOutcome::DailyWord(api.daily_word().await)),

        UiCommand::LoadHistoryList => {
            let Some(user) = services.session.user_id() else {
                return emit(EffectOutcome::NotSignedIn);
            };
            let result = api
                .lists_excluding_history(&user)
                .await
                .map(|response| {
                    services
                        .session
                        .set_history_list(response.vocab_history_id.clone());
                    response.vocab_history_id
                })
                .map_err(|e| Failure::from_api(&e, LISTS_FALLBACK));
            emit(EffectOutcome::HistoryList(result));
        }

        UiCommand::SaveToHistory {
            list_id,
            word,
            definition,
        } => {
            let Some(user) = services.session.user_id() else {
                return emit(EffectOutcome::NotSignedIn);
            };
            let result = api
                .add_word(&user, &list_id, &word, &definition)
                .await
                .map(|_| ())
                .map_err(|e| Failure::from_api(&e, SAVE_WORD_FALLBACK));
            emit(EffectOutcome::SavedToHistory(result));
        }

        UiCommand::LoadPickableLists => {
            let Some(user) = services.session.user_id() else {
                return emit(EffectOutcome::NotSignedIn);
            };
            let result = api
                .lists_excluding_history(&user)
                .await
                .map(|response| {
                    services
                        .session
                        .set_history_list(response.vocab_history_id.clone());
                    response.lists
                })
                .map_err(|e| Failure::from_api(&e, LISTS_FALLBACK));
            emit(EffectOutcome::PickableLists(result));
        }

        UiCommand::LoadAllLists => {
            let Some(user) = services.session.user_id() else {
                return emit(EffectOutcome::NotSignedIn);
            };
            let result = api
                .all_lists(&user)
                .await
                .map_err(|e| Failure::from_api(&e, LISTS_FALLBACK));
            emit(EffectOutcome::AllLists(result));
        }

        UiCommand::SaveWord {
            list,
            word,
            definition,
        } => {
            let Some(user) = services.session.user_id() else {
                return emit(EffectOutcome::NotSignedIn);
            };
            let result = api
                .add_word(&user, &list.id, &word, &definition)
                .await
                .map(|_| ())
                .map_err(|e| Failure::from_api(&e, SAVE_WORD_FALLBACK));
            emit(EffectOutcome::WordSaved {
                list_name: list.list_name,
                result,
            });
        }

        UiCommand::CreateList { name } => {
            let Some(user) = services.session.user_id() else {
                return emit(EffectOutcome::NotSignedIn);
            };
            let result = api
                .create_list(&user, &name)
                .await
                .map(|_| ())
                .map_err(|e| Failure::from_api(&e, CREATE_LIST_FALLBACK));
            emit(EffectOutcome::ListCreated(result));
        }

        UiCommand::LoadWords { list_id } => {
            let Some(user) = services.session.user_id() else {
                return emit(EffectOutcome::NotSignedIn);
            };
            let result = api
                .words_in_list(&user, &list_id)
                .await
                .map_err(|e| Failure::from_api(&e, WORDS_FALLBACK));
            emit(EffectOutcome::Words(result));
        }

        UiCommand::DeleteList { list_id } => {
            let Some(user) = services.session.user_id() else {
                return emit(EffectOutcome::NotSignedIn);
            };
            let result = api.delete_list(&user, &list_id).await.map_err(|e| {
                tracing::warn!(list = %list_id, error = %e, "delete list failed");
                Failure {
                    connection: e.is_transport(),
                    message: DELETE_CONNECTION.to_string(),
                }
            });
            emit(EffectOutcome::ListDeleted(result));
        }

        UiCommand::Login { email, password } => {
            let result = api
                .login(&email, &password)
                .await
                .map(|user_id| identity(user_id, &email, AuthProvider::Password))
                .map_err(|e| Failure::from_api(&e, GENERIC_FALLBACK));
            emit(EffectOutcome::LoggedIn(result));
        }

        UiCommand::Register(registration) => {
            let result = match api.register(&registration).await {
                Ok(_) => {
                    cache_registration(services.store.as_ref(), &registration).await;
                    Ok(())
                }
                Err(e) => Err(Failure::from_api(&e, GENERIC_FALLBACK)),
            };
            emit(EffectOutcome::Registered(result));
        }

        UiCommand::LookupSecurityQuestion { email } => {
            let result = match &services.store {
                Some(store) => store
                    .security_question(&email)
                    .await
                    .map_err(|e| store_failure(&e, RESET_FALLBACK)),
                None => Err(Failure::local(RESET_UNAVAILABLE)),
            };
            emit(EffectOutcome::SecurityQuestion { email, result });
        }

        UiCommand::VerifySecurityAnswer { email, answer } => {
            let result = match &services.store {
                Some(store) => store
                    .verify_security_answer(&email, &answer)
                    .await
                    .map_err(|e| store_failure(&e, RESET_FALLBACK)),
                None => Err(Failure::local(RESET_UNAVAILABLE)),
            };
            emit(EffectOutcome::AnswerChecked { email, result });
        }

        UiCommand::ResetPassword {
            email,
            new_password,
        } => {
            let result = match &services.store {
                Some(store) => store
                    .reset_password(&email, &new_password)
                    .await
                    .map_err(|e| store_failure(&e, RESET_FALLBACK)),
                None => Err(Failure::local(RESET_UNAVAILABLE)),
            };
            emit(EffectOutcome::PasswordReset(result));
        }

        UiCommand::BeginGoogle => {
            let result = match &services.google {
                Some(google) => google
                    .authorization_request()
                    .map_err(|e| Failure::local(e.user_message())),
                None => Err(Failure::local(GoogleAuthError::NotConfigured.to_string())),
            };
            emit(EffectOutcome::GoogleReady(result));
        }

        UiCommand::CompleteGoogle { pending, redirect } => {
            let Some(google) = &services.google else {
                return emit(EffectOutcome::GoogleFinished(Err(Failure::local(
                    GoogleAuthError::NotConfigured.to_string(),
                ))));
            };
            let result = complete_google(services, google, &pending, &redirect, &mut emit).await;
            emit(EffectOutcome::GoogleFinished(result.map_err(|e| {
                tracing::warn!(error = %e, "google sign-in failed");
                Failure {
                    connection: matches!(
                        &e,
                        GoogleAuthError::Transport(_)
                            | GoogleAuthError::Backend(ApiError::Transport { .. })
                    ),
                    message: e.user_message(),
                }
            })));
        }
    }
}

async fn complete_google(
    services: &Services,
    google: &GoogleOAuth,
    pending: &PendingAuthorization,
    redirect: &str,
    emit: &mut (impl FnMut(EffectOutcome) + Send),
) -> Result<GoogleAccount, GoogleAuthError> {
    let code = parse_redirect(redirect, &pending.state)?;
    let token = google.exchange_code(pending, &code).await?;
    emit(EffectOutcome::GoogleTokenReceived);

    let profile = google.fetch_profile(&token).await?;
    let signed_in = sign_in_with_google(&services.api, &profile, |step| {
        emit(EffectOutcome::GoogleStep(step))
    })
    .await?;

    Ok(GoogleAccount {
        identity: identity(signed_in.user_id, &profile.email, AuthProvider::Google),
        registered: signed_in.registered,
    })
}

fn identity(user_id: UserId, email: &str, provider: AuthProvider) -> Identity {
    Identity {
        user_id,
        email: email.trim().to_string(),
        provider,
    }
}

async fn cache_registration(store: Option<&LocalAuthStore>, registration: &Registration) {
    let Some(store) = store else {
        return;
    };
    if let Err(e) = store
        .remember_user(
            &registration.email,
            &registration.password,
            &registration.security_question,
            &registration.security_answer,
        )
        .await
    {
        tracing::warn!(error = %e, "failed to cache registration locally");
    }
}

fn store_failure(err: &StoreError, fallback: &str) -> Failure {
    match err {
        StoreError::NotFound { .. } => Failure::local(UNKNOWN_EMAIL),
        StoreError::Database(e) => {
            tracing::error!(error = %e, "local store query failed");
            Failure::local(fallback)
        }
    }
}
