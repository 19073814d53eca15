use crate::api::VocabList;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum ListsIntent {
    Refresh,
    Loaded(Vec<VocabList>),
    Failed(String),
    MoveUp,
    MoveDown,
    SaveStarted,
    SaveFinished,
}

impl Intent for ListsIntent {}
