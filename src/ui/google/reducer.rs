use crate::auth::GoogleStep;
use crate::ui::form::{FormIntent, FormReducer};
use crate::ui::google::intent::GoogleIntent;
use crate::ui::google::state::GoogleState;
use crate::ui::mvi::Reducer;

pub struct GoogleReducer;

impl Reducer for GoogleReducer {
    type State = GoogleState;
    type Intent = GoogleIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match (state, intent) {
            (GoogleState::Idle | GoogleState::Failed { .. }, GoogleIntent::Started(pending)) => {
                GoogleState::awaiting(pending)
            }
            (GoogleState::Failed { .. }, GoogleIntent::Retry) => GoogleState::Idle,

            (GoogleState::AwaitingRedirect { pending, input }, GoogleIntent::Edit(edit)) => {
                GoogleState::AwaitingRedirect {
                    pending,
                    input: FormReducer::reduce(input, edit),
                }
            }
            (GoogleState::AwaitingRedirect { pending, input }, GoogleIntent::RedirectSubmitted) => {
                GoogleState::AwaitingRedirect {
                    pending,
                    input: FormReducer::reduce(input, FormIntent::SubmitStarted),
                }
            }
            (GoogleState::AwaitingRedirect { input, .. }, GoogleIntent::TokenReceived)
                if input.submitting =>
            {
                GoogleState::TokenReceived
            }
            (GoogleState::TokenReceived, GoogleIntent::Step(GoogleStep::BackendLogin)) => {
                GoogleState::BackendLogin
            }
            (GoogleState::BackendLogin, GoogleIntent::Step(GoogleStep::Registering)) => {
                GoogleState::Registering
            }
            (GoogleState::BackendLogin, GoogleIntent::Finished { registered: false }) => {
                GoogleState::LoggedIn
            }
            (GoogleState::Registering, GoogleIntent::Finished { registered: true }) => {
                GoogleState::Registered
            }

            (state, GoogleIntent::Failed(message)) if !state.is_terminal() => {
                GoogleState::Failed { message }
            }

            (state, _) => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{GoogleOAuth, PendingAuthorization};
    use crate::config::GoogleConfig;

    fn pending() -> PendingAuthorization {
        GoogleOAuth::new(&GoogleConfig {
            client_id: "id".to_string(),
            ..GoogleConfig::default()
        })
        .unwrap()
        .authorization_request()
        .unwrap()
    }

    fn run(intents: Vec<GoogleIntent>) -> GoogleState {
        intents
            .into_iter()
            .fold(GoogleState::default(), GoogleReducer::reduce)
    }

    #[test]
    fn existing_user_path() {
        let state = run(vec![
            GoogleIntent::Started(pending()),
            GoogleIntent::Edit(FormIntent::Paste("code".to_string())),
            GoogleIntent::RedirectSubmitted,
            GoogleIntent::TokenReceived,
            GoogleIntent::Step(GoogleStep::BackendLogin),
            GoogleIntent::Finished { registered: false },
        ]);
        assert_eq!(state, GoogleState::LoggedIn);
    }

    #[test]
    fn new_user_path() {
        let state = run(vec![
            GoogleIntent::Started(pending()),
            GoogleIntent::RedirectSubmitted,
            GoogleIntent::TokenReceived,
            GoogleIntent::Step(GoogleStep::BackendLogin),
            GoogleIntent::Step(GoogleStep::Registering),
            GoogleIntent::Finished { registered: true },
        ]);
        assert_eq!(state, GoogleState::Registered);
    }

    #[test]
    fn failure_from_any_pending_state() {
        for prefix in [
            vec![],
            vec![GoogleIntent::Started(pending())],
            vec![
                GoogleIntent::Started(pending()),
                GoogleIntent::RedirectSubmitted,
                GoogleIntent::TokenReceived,
            ],
        ] {
            let mut intents = prefix;
            intents.push(GoogleIntent::Failed("boom".to_string()));
            assert_eq!(
                run(intents),
                GoogleState::Failed {
                    message: "boom".to_string()
                }
            );
        }
    }

    #[test]
    fn terminal_states_ignore_failure() {
        let state = run(vec![
            GoogleIntent::Started(pending()),
            GoogleIntent::RedirectSubmitted,
            GoogleIntent::TokenReceived,
            GoogleIntent::Step(GoogleStep::BackendLogin),
            GoogleIntent::Finished { registered: false },
            GoogleIntent::Failed("late".to_string()),
        ]);
        assert_eq!(state, GoogleState::LoggedIn);
    }

    #[test]
    fn out_of_order_steps_ignored() {
        let state = run(vec![
            GoogleIntent::Started(pending()),
            GoogleIntent::Step(GoogleStep::Registering),
        ]);
        assert!(matches!(state, GoogleState::AwaitingRedirect { .. }));
    }

    #[test]
    fn retry_after_failure() {
        let state = run(vec![
            GoogleIntent::Failed("x".to_string()),
            GoogleIntent::Retry,
        ]);
        assert_eq!(state, GoogleState::Idle);
    }
}
