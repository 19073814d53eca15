use crate::api::ListWords;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum WordsIntent {
    Refresh,
    Loaded(ListWords),
    Failed(String),
    ScrollUp,
    ScrollDown,
    RequestDelete,
    CancelDelete,
    DeleteStarted,
    DeleteFinished,
}

impl Intent for WordsIntent {}
