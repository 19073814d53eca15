use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum FormIntent {
    Input(char),
    Paste(String),
    Backspace,
    ClearField,
    FocusNext,
    FocusPrev,
    SubmitStarted,
    SubmitFinished,
}

impl Intent for FormIntent {}
