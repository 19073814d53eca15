use crate::api::ListId;

/// A screen in the navigation stack.
///
/// Routes carry only what the screen cannot look up itself; the user
/// identity always comes from the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    CreateAccount,
    GoogleSignIn,
    ForgotPassword,
    VerifySecurityAnswer { email: String, question: String },
    ResetPassword { email: String },
    Landing,
    PickList { word: String, definition: String },
    ListCreation,
    VocabLists,
    WordList { list_id: ListId, list_name: String },
}

impl Route {
    /// Screens that need a signed-in user.
    pub fn requires_session(&self) -> bool {
        matches!(
            self,
            Route::Landing
                | Route::PickList { .. }
                | Route::ListCreation
                | Route::VocabLists
                | Route::WordList { .. }
        )
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Vocab Vault",
            Route::Login => "Welcome Back!",
            Route::CreateAccount => "Create Account",
            Route::GoogleSignIn => "Sign in with Google",
            Route::ForgotPassword => "Forgot Password",
            Route::VerifySecurityAnswer { .. } => "Security Question",
            Route::ResetPassword { .. } => "Reset Password",
            Route::Landing => "Word of the Day",
            Route::PickList { .. } => "Pick a List",
            Route::ListCreation => "Create a New Vocab List",
            Route::VocabLists => "Your Vocab Lists",
            Route::WordList { .. } => "Vocab List",
        }
    }
}

/// How to move after an action completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Push(Route),
    Back,
    /// Pop back to the nearest `route` in the stack, or replace the top
    /// screen with it when it is not stacked.
    BackTo(Route),
    /// Replace the whole stack.
    Reset(Route),
}
