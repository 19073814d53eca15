use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::DeleteListOutcome;
use crate::effects::{
    EffectOutcome, Failure, GoogleAccount, TaggedCommand, UiCommand, UiCommandSender,
};
use crate::session::{Identity, Session};
use crate::ui::auth::{self, ANSWER_MISSING, EMAIL_MISSING, PASSWORD_MISSING};
use crate::ui::form::{FormIntent, FormReducer};
use crate::ui::google::{GoogleIntent, GoogleReducer, GoogleState};
use crate::ui::landing::{LandingIntent, LandingReducer, NO_WORD_TO_SAVE};
use crate::ui::lists::{self, ListsIntent, ListsReducer};
use crate::ui::mvi::Reducer;
use crate::ui::route::{Navigation, Route};
use crate::ui::screen::Screen;
use crate::ui::words::{WordsIntent, WordsReducer};

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($state:expr, $reducer:ty, $intent:expr) => {
        *$state = <$reducer>::reduce(std::mem::take($state), $intent)
    };
}

/// Modal message. Dismissing it performs `then`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub then: Option<Navigation>,
}

pub struct App {
    should_quit: bool,
    stack: Vec<Route>,
    screen: Screen,
    /// Bumped on every navigation; effect results carry the value current
    /// when they were requested.
    generation: u64,
    alert: Option<Alert>,
    session: Session,
    commands: Option<UiCommandSender>,
}

impl App {
    pub fn new(session: Session) -> Self {
        let initial = if session.is_signed_in() {
            Route::Landing
        } else {
            Route::Home
        };
        Self {
            should_quit: false,
            screen: Screen::for_route(&initial),
            stack: vec![initial],
            generation: 0,
            alert: None,
            session,
            commands: None,
        }
    }

    pub fn set_command_sender(&mut self, sender: UiCommandSender) {
        self.commands = Some(sender);
    }

    /// Issue the mount requests of the initial screen.
    pub fn start(&mut self) {
        self.mount();
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn route(&self) -> &Route {
        // The stack is never empty: every navigation leaves one route.
        self.stack.last().unwrap_or(&Route::Home)
    }

    pub fn stack(&self) -> &[Route] {
        &self.stack
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn navigate(&mut self, navigation: Navigation) {
        match navigation {
            Navigation::Push(route) => self.stack.push(route),
            Navigation::Back => {
                if self.stack.len() > 1 {
                    self.stack.pop();
                }
            }
            Navigation::BackTo(route) => {
                match self.stack.iter().rposition(|r| *r == route) {
                    Some(index) => self.stack.truncate(index + 1),
                    None => {
                        self.stack.pop();
                        self.stack.push(route);
                    }
                }
            }
            Navigation::Reset(route) => {
                self.stack.clear();
                self.stack.push(route);
            }
        }

        if self.route().requires_session() && !self.session.is_signed_in() {
            tracing::info!(route = ?self.route(), "no session, returning home");
            self.stack = vec![Route::Home];
        }

        self.generation += 1;
        self.screen = Screen::for_route(self.route());
        tracing::debug!(route = ?self.route(), generation = self.generation, "navigated");
        self.mount();
    }

    fn mount(&mut self) {
        match self.route().clone() {
            Route::Landing => {
                self.send(UiCommand::LoadDailyWord);
                self.send(UiCommand::LoadHistoryList);
            }
            Route::PickList { .. } => {
                self.send(UiCommand::LoadPickableLists);
            }
            Route::VocabLists => {
                self.send(UiCommand::LoadAllLists);
            }
            Route::WordList { list_id, .. } => {
                self.send(UiCommand::LoadWords { list_id });
            }
            Route::GoogleSignIn => {
                self.send(UiCommand::BeginGoogle);
            }
            _ => {}
        }
    }

    /// A failed write only loses persistence across restarts.
    fn sign_in(&mut self, identity: Identity) {
        if let Err(e) = self.session.sign_in(identity) {
            tracing::warn!(error = %e, "failed to persist session");
        }
    }

    pub fn sign_out(&mut self) {
        if let Err(e) = self.session.sign_out() {
            tracing::warn!(error = %e, "failed to remove session file");
        }
        self.navigate(Navigation::Reset(Route::Home));
    }

    // ========================================================================
    // Alerts
    // ========================================================================

    pub fn show_alert(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        then: Option<Navigation>,
    ) {
        self.alert = Some(Alert {
            title: title.into(),
            message: message.into(),
            then,
        });
    }

    fn show_failure(&mut self, screen_title: &str, failure: &Failure) {
        let title = failure.title(screen_title).to_string();
        self.show_alert(title, failure.message.clone(), None);
    }

    pub fn dismiss_alert(&mut self) {
        if let Some(Alert {
            then: Some(navigation),
            ..
        }) = self.alert.take()
        {
            self.navigate(navigation);
        }
    }

    // ========================================================================
    // Commands
    // ========================================================================

    fn send(&mut self, command: UiCommand) -> bool {
        let Some(sender) = &self.commands else {
            return false;
        };
        let tagged = TaggedCommand {
            generation: self.generation,
            command,
        };
        match sender.try_send(tagged) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(error = %err, "command send failed");
                self.show_alert("Error", "The request could not be started.", None);
                false
            }
        }
    }

    // ========================================================================
    // MVI dispatch
    // ========================================================================

    fn dispatch_form(&mut self, intent: FormIntent) {
        if let Some(form) = self.screen.form_mut() {
            dispatch_mvi!(form, FormReducer, intent);
        }
    }

    fn dispatch_google(&mut self, intent: GoogleIntent) {
        if let Screen::GoogleSignIn(state) = &mut self.screen {
            dispatch_mvi!(state, GoogleReducer, intent);
        }
    }

    fn dispatch_landing(&mut self, intent: LandingIntent) {
        if let Screen::Landing(state) = &mut self.screen {
            dispatch_mvi!(state, LandingReducer, intent);
        }
    }

    fn dispatch_lists(&mut self, intent: ListsIntent) {
        if let Screen::PickList(state) | Screen::VocabLists(state) = &mut self.screen {
            dispatch_mvi!(state, ListsReducer, intent);
        }
    }

    fn dispatch_words(&mut self, intent: WordsIntent) {
        if let Screen::WordList(state) = &mut self.screen {
            dispatch_mvi!(state, WordsReducer, intent);
        }
    }

    // ========================================================================
    // Input
    // ========================================================================

    pub fn on_key(&mut self, key: KeyEvent) {
        match &self.screen {
            Screen::Home => self.on_home_key(key),
            Screen::GoogleSignIn(_) => self.on_google_key(key),
            Screen::Landing(_) => self.on_landing_key(key),
            Screen::PickList(_) | Screen::VocabLists(_) => self.on_lists_key(key),
            Screen::WordList(_) => self.on_words_key(key),
            _ => self.on_form_key(key),
        }
    }

    pub fn on_paste(&mut self, text: &str) {
        if self.alert.is_some() {
            return;
        }
        match &self.screen {
            Screen::GoogleSignIn(_) => {
                self.dispatch_google(GoogleIntent::Edit(FormIntent::Paste(text.to_string())))
            }
            _ => self.dispatch_form(FormIntent::Paste(text.to_string())),
        }
    }

    fn on_home_key(&mut self, key: KeyEvent) {
        let target = match key.code {
            KeyCode::Char('l') => Route::Login,
            KeyCode::Char('c') => Route::CreateAccount,
            KeyCode::Char('g') => Route::GoogleSignIn,
            KeyCode::Char('f') => Route::ForgotPassword,
            KeyCode::Char('q') => {
                self.request_quit();
                return;
            }
            _ => return,
        };
        self.navigate(Navigation::Push(target));
    }

    fn on_form_key(&mut self, key: KeyEvent) {
        if matches!(self.screen, Screen::Login(_))
            && key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('f'))
        {
            self.navigate(Navigation::Push(Route::ForgotPassword));
            return;
        }
        match key.code {
            KeyCode::Esc => self.navigate(Navigation::Back),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab | KeyCode::Down => self.dispatch_form(FormIntent::FocusNext),
            KeyCode::BackTab | KeyCode::Up => self.dispatch_form(FormIntent::FocusPrev),
            KeyCode::Backspace => self.dispatch_form(FormIntent::Backspace),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.dispatch_form(FormIntent::ClearField)
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.dispatch_form(FormIntent::Input(ch))
            }
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let Some(form) = self.screen.form() else {
            return;
        };
        if form.submitting {
            return;
        }

        let request = match (&self.screen, self.route().clone()) {
            (Screen::Login(form), _) => auth::login_request(form)
                .map(|(email, password)| UiCommand::Login { email, password }),
            (Screen::CreateAccount(form), _) => {
                auth::registration_request(form).map(UiCommand::Register)
            }
            (Screen::ForgotPassword(form), _) => auth::single_value(form, EMAIL_MISSING)
                .map(|email| UiCommand::LookupSecurityQuestion { email }),
            (Screen::VerifySecurityAnswer(form), Route::VerifySecurityAnswer { email, .. }) => {
                auth::single_value(form, ANSWER_MISSING)
                    .map(|answer| UiCommand::VerifySecurityAnswer { email, answer })
            }
            (Screen::ResetPassword(form), Route::ResetPassword { email }) => {
                let new_password = form.value(0).to_string();
                if new_password.is_empty() {
                    Err(PASSWORD_MISSING)
                } else {
                    Ok(UiCommand::ResetPassword {
                        email,
                        new_password,
                    })
                }
            }
            (Screen::ListCreation(form), _) => {
                lists::list_name_request(form).map(|name| UiCommand::CreateList { name })
            }
            _ => return,
        };

        match request {
            Ok(command) => {
                if self.send(command) {
                    self.dispatch_form(FormIntent::SubmitStarted);
                }
            }
            Err(message) => self.show_alert("Error", message, None),
        }
    }

    fn on_google_key(&mut self, key: KeyEvent) {
        let Screen::GoogleSignIn(state) = &self.screen else {
            return;
        };
        match (state, key.code) {
            (_, KeyCode::Esc) => self.navigate(Navigation::Back),
            (GoogleState::Failed { .. }, KeyCode::Char('r')) => {
                self.dispatch_google(GoogleIntent::Retry);
                self.send(UiCommand::BeginGoogle);
            }
            (GoogleState::AwaitingRedirect { pending, input }, KeyCode::Enter) => {
                if input.submitting {
                    return;
                }
                let redirect = input.value(0).trim().to_string();
                if redirect.is_empty() {
                    self.show_alert("Error", "Paste the redirect URL or code first.", None);
                    return;
                }
                let command = UiCommand::CompleteGoogle {
                    pending: pending.clone(),
                    redirect,
                };
                if self.send(command) {
                    self.dispatch_google(GoogleIntent::RedirectSubmitted);
                }
            }
            (GoogleState::AwaitingRedirect { .. }, KeyCode::Backspace) => {
                self.dispatch_google(GoogleIntent::Edit(FormIntent::Backspace))
            }
            (GoogleState::AwaitingRedirect { .. }, KeyCode::Char(ch))
                if !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.dispatch_google(GoogleIntent::Edit(FormIntent::Input(ch)))
            }
            _ => {}
        }
    }

    fn on_landing_key(&mut self, key: KeyEvent) {
        let Screen::Landing(state) = &self.screen else {
            return;
        };
        match key.code {
            KeyCode::Char('r') => {
                self.dispatch_landing(LandingIntent::WordRequested);
                self.send(UiCommand::LoadDailyWord);
            }
            KeyCode::Char('s') => {
                if state.saving {
                    return;
                }
                match state.history_save() {
                    Ok(save) => {
                        let command = UiCommand::SaveToHistory {
                            list_id: save.list_id,
                            word: save.word,
                            definition: save.definition,
                        };
                        if self.send(command) {
                            self.dispatch_landing(LandingIntent::SaveStarted);
                        }
                    }
                    Err(message) => self.show_alert("Error", message, None),
                }
            }
            KeyCode::Char('p') => match state.current_word() {
                Some(word) => {
                    let route = Route::PickList {
                        word: word.word.clone(),
                        definition: word.definition.clone(),
                    };
                    self.navigate(Navigation::Push(route));
                }
                None => self.show_alert("Error", NO_WORD_TO_SAVE, None),
            },
            KeyCode::Char('n') => self.navigate(Navigation::Push(Route::ListCreation)),
            KeyCode::Char('v') => self.navigate(Navigation::Push(Route::VocabLists)),
            KeyCode::Char('o') => self.sign_out(),
            KeyCode::Char('q') => self.request_quit(),
            _ => {}
        }
    }

    fn on_lists_key(&mut self, key: KeyEvent) {
        let (Screen::PickList(state) | Screen::VocabLists(state)) = &self.screen else {
            return;
        };
        let picking = matches!(self.screen, Screen::PickList(_));
        match key.code {
            KeyCode::Esc => self.navigate(Navigation::Back),
            KeyCode::Up | KeyCode::Char('k') => self.dispatch_lists(ListsIntent::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => self.dispatch_lists(ListsIntent::MoveDown),
            KeyCode::Char('r') => {
                self.dispatch_lists(ListsIntent::Refresh);
                let command = if picking {
                    UiCommand::LoadPickableLists
                } else {
                    UiCommand::LoadAllLists
                };
                self.send(command);
            }
            KeyCode::Char('n') => self.navigate(Navigation::Push(Route::ListCreation)),
            KeyCode::Enter => {
                let Some(list) = state.selected_list().cloned() else {
                    return;
                };
                if !picking {
                    self.navigate(Navigation::Push(Route::WordList {
                        list_id: list.id,
                        list_name: list.list_name,
                    }));
                    return;
                }
                if state.saving {
                    return;
                }
                let Route::PickList { word, definition } = self.route().clone() else {
                    return;
                };
                if self.send(UiCommand::SaveWord {
                    list,
                    word,
                    definition,
                }) {
                    self.dispatch_lists(ListsIntent::SaveStarted);
                }
            }
            _ => {}
        }
    }

    fn on_words_key(&mut self, key: KeyEvent) {
        let Screen::WordList(state) = &self.screen else {
            return;
        };
        if state.confirm_delete {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    let Route::WordList { list_id, .. } = self.route().clone() else {
                        return;
                    };
                    if self.send(UiCommand::DeleteList { list_id }) {
                        self.dispatch_words(WordsIntent::DeleteStarted);
                    }
                }
                KeyCode::Char('n') | KeyCode::Esc => self.dispatch_words(WordsIntent::CancelDelete),
                _ => {}
            }
            return;
        }
        match key.code {
            KeyCode::Esc => self.navigate(Navigation::Back),
            KeyCode::Up | KeyCode::Char('k') => self.dispatch_words(WordsIntent::ScrollUp),
            KeyCode::Down | KeyCode::Char('j') => self.dispatch_words(WordsIntent::ScrollDown),
            KeyCode::Char('d') => self.dispatch_words(WordsIntent::RequestDelete),
            KeyCode::Char('r') => {
                let Route::WordList { list_id, .. } = self.route().clone() else {
                    return;
                };
                self.dispatch_words(WordsIntent::Refresh);
                self.send(UiCommand::LoadWords { list_id });
            }
            _ => {}
        }
    }

    // ========================================================================
    // Effect results
    // ========================================================================

    pub fn on_effect(&mut self, generation: u64, outcome: EffectOutcome) {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "dropping result for a screen that is gone"
            );
            return;
        }

        match outcome {
            EffectOutcome::DailyWord(word) => {
                self.dispatch_landing(LandingIntent::WordLoaded(word));
            }
            EffectOutcome::HistoryList(Ok(id)) => {
                self.dispatch_landing(LandingIntent::HistoryLoaded(id));
            }
            EffectOutcome::HistoryList(Err(failure)) => {
                self.dispatch_landing(LandingIntent::HistoryFailed(failure.message));
            }
            EffectOutcome::SavedToHistory(result) => {
                self.dispatch_landing(LandingIntent::SaveFinished);
                match result {
                    Ok(()) => self.show_alert("Success", "Word saved to history!", None),
                    Err(failure) => self.show_failure("Error", &failure),
                }
            }
            EffectOutcome::PickableLists(result) | EffectOutcome::AllLists(result) => match result {
                Ok(lists) => self.dispatch_lists(ListsIntent::Loaded(lists)),
                Err(failure) => {
                    self.dispatch_lists(ListsIntent::Failed(failure.message.clone()));
                    self.show_failure("Error", &failure);
                }
            },
            EffectOutcome::WordSaved { list_name, result } => {
                self.dispatch_lists(ListsIntent::SaveFinished);
                match result {
                    Ok(()) => self.show_alert(
                        "Success",
                        format!("Word saved to {}!", list_name),
                        Some(Navigation::Back),
                    ),
                    Err(failure) => self.show_failure("Error", &failure),
                }
            }
            EffectOutcome::ListCreated(result) => {
                self.dispatch_form(FormIntent::SubmitFinished);
                match result {
                    Ok(()) => self.show_alert(
                        "Success",
                        "List created successfully!",
                        Some(Navigation::BackTo(Route::Landing)),
                    ),
                    Err(failure) => self.show_failure("Error", &failure),
                }
            }
            EffectOutcome::Words(result) => match result {
                Ok(words) => self.dispatch_words(WordsIntent::Loaded(words)),
                Err(failure) => {
                    self.dispatch_words(WordsIntent::Failed(failure.message.clone()));
                    self.show_failure("Error", &failure);
                }
            },
            EffectOutcome::ListDeleted(result) => {
                self.dispatch_words(WordsIntent::DeleteFinished);
                match result {
                    Ok(outcome) => self.on_list_deleted(outcome),
                    Err(failure) => self.show_failure("Error", &failure),
                }
            }
            EffectOutcome::LoggedIn(result) => {
                self.dispatch_form(FormIntent::SubmitFinished);
                match result {
                    Ok(identity) => {
                        self.sign_in(identity);
                        self.navigate(Navigation::Reset(Route::Landing));
                    }
                    Err(failure) => self.show_failure("Login Failed", &failure),
                }
            }
            EffectOutcome::Registered(result) => {
                self.dispatch_form(FormIntent::SubmitFinished);
                match result {
                    Ok(()) => self.show_alert(
                        "Sign Up Successful",
                        "You can now log in.",
                        Some(Navigation::BackTo(Route::Login)),
                    ),
                    Err(failure) => self.show_failure("Sign Up Failed", &failure),
                }
            }
            EffectOutcome::SecurityQuestion { email, result } => {
                self.dispatch_form(FormIntent::SubmitFinished);
                match result {
                    Ok(question) => self.navigate(Navigation::Push(Route::VerifySecurityAnswer {
                        email,
                        question,
                    })),
                    Err(failure) => self.show_failure("Error", &failure),
                }
            }
            EffectOutcome::AnswerChecked { email, result } => {
                self.dispatch_form(FormIntent::SubmitFinished);
                match result {
                    Ok(true) => self.navigate(Navigation::Push(Route::ResetPassword { email })),
                    Ok(false) => {
                        self.show_alert("Error", "Incorrect answer. Please try again.", None)
                    }
                    Err(failure) => self.show_failure("Error", &failure),
                }
            }
            EffectOutcome::PasswordReset(result) => {
                self.dispatch_form(FormIntent::SubmitFinished);
                match result {
                    Ok(()) => self.show_alert(
                        "Success",
                        "Your password has been reset.",
                        Some(Navigation::BackTo(Route::Home)),
                    ),
                    Err(failure) => self.show_failure("Error", &failure),
                }
            }
            EffectOutcome::GoogleReady(Ok(pending)) => {
                self.dispatch_google(GoogleIntent::Started(pending));
            }
            EffectOutcome::GoogleReady(Err(failure)) => {
                self.dispatch_google(GoogleIntent::Failed(failure.message));
            }
            EffectOutcome::GoogleTokenReceived => {
                self.dispatch_google(GoogleIntent::TokenReceived);
            }
            EffectOutcome::GoogleStep(step) => {
                self.dispatch_google(GoogleIntent::Step(step));
            }
            EffectOutcome::GoogleFinished(Ok(GoogleAccount {
                identity,
                registered,
            })) => {
                self.sign_in(identity);
                self.dispatch_google(GoogleIntent::Finished { registered });
                if registered {
                    self.show_alert(
                        "Welcome",
                        "Your account was created with Google.",
                        Some(Navigation::Reset(Route::Landing)),
                    );
                } else {
                    self.navigate(Navigation::Reset(Route::Landing));
                }
            }
            EffectOutcome::GoogleFinished(Err(failure)) => {
                self.dispatch_google(GoogleIntent::Failed(failure.message));
            }
            EffectOutcome::NotSignedIn => {
                self.show_alert(
                    "Signed Out",
                    "Please log in again.",
                    Some(Navigation::Reset(Route::Home)),
                );
            }
        }
    }

    fn on_list_deleted(&mut self, outcome: DeleteListOutcome) {
        let then = outcome
            .returns_to_lists()
            .then(|| Navigation::BackTo(Route::VocabLists));
        self.show_alert(outcome.title(), outcome.message(), then);
    }
}
