use crate::auth::{GoogleStep, PendingAuthorization};
use crate::ui::form::FormIntent;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum GoogleIntent {
    /// Authorization URL is ready.
    Started(PendingAuthorization),
    /// Edit of the paste field.
    Edit(FormIntent),
    RedirectSubmitted,
    TokenReceived,
    Step(GoogleStep),
    Finished { registered: bool },
    Failed(String),
    Retry,
}

impl Intent for GoogleIntent {}
