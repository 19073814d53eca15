use crate::ui::auth;
use crate::ui::form::FormState;
use crate::ui::google::GoogleState;
use crate::ui::landing::LandingState;
use crate::ui::lists::{self, ListsState};
use crate::ui::route::Route;
use crate::ui::words::WordsState;

/// State of the screen on top of the stack. Rebuilt from scratch every
/// time a route is entered.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Home,
    Login(FormState),
    CreateAccount(FormState),
    GoogleSignIn(GoogleState),
    ForgotPassword(FormState),
    VerifySecurityAnswer(FormState),
    ResetPassword(FormState),
    Landing(LandingState),
    PickList(ListsState),
    ListCreation(FormState),
    VocabLists(ListsState),
    WordList(WordsState),
}

impl Screen {
    pub fn for_route(route: &Route) -> Self {
        match route {
            Route::Home => Screen::Home,
            Route::Login => Screen::Login(auth::login_form()),
            Route::CreateAccount => Screen::CreateAccount(auth::create_account_form()),
            Route::GoogleSignIn => Screen::GoogleSignIn(GoogleState::default()),
            Route::ForgotPassword => Screen::ForgotPassword(auth::forgot_password_form()),
            Route::VerifySecurityAnswer { .. } => {
                Screen::VerifySecurityAnswer(auth::security_answer_form())
            }
            Route::ResetPassword { .. } => Screen::ResetPassword(auth::reset_password_form()),
            Route::Landing => Screen::Landing(LandingState::default()),
            Route::PickList { .. } => Screen::PickList(ListsState::default()),
            Route::ListCreation => Screen::ListCreation(lists::list_creation_form()),
            Route::VocabLists => Screen::VocabLists(ListsState::default()),
            Route::WordList { list_name, .. } => Screen::WordList(WordsState::new(list_name)),
        }
    }

    /// The form of form-only screens.
    pub fn form(&self) -> Option<&FormState> {
        match self {
            Screen::Login(form)
            | Screen::CreateAccount(form)
            | Screen::ForgotPassword(form)
            | Screen::VerifySecurityAnswer(form)
            | Screen::ResetPassword(form)
            | Screen::ListCreation(form) => Some(form),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut FormState> {
        match self {
            Screen::Login(form)
            | Screen::CreateAccount(form)
            | Screen::ForgotPassword(form)
            | Screen::VerifySecurityAnswer(form)
            | Screen::ResetPassword(form)
            | Screen::ListCreation(form) => Some(form),
            _ => None,
        }
    }
}
