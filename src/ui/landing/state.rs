use crate::api::{DailyWord, ListId};
use crate::ui::loadable::Loadable;
use crate::ui::mvi::UiState;

pub const NO_WORD_TO_SAVE: &str = "No word to save";
pub const HISTORY_NOT_LOADED: &str = "Vocab history not loaded yet. Please wait.";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LandingState {
    pub word: Loadable<DailyWord>,
    /// `Loaded(None)` when the backend sent no history id.
    pub history: Loadable<Option<ListId>>,
    pub saving: bool,
}

impl UiState for LandingState {}

/// What a save to the history list would send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySave {
    pub list_id: ListId,
    pub word: String,
    pub definition: String,
}

impl LandingState {
    pub fn current_word(&self) -> Option<&DailyWord> {
        self.word.loaded().filter(|word| !word.is_placeholder())
    }

    pub fn history_list(&self) -> Option<&ListId> {
        self.history.loaded().and_then(Option::as_ref)
    }

    /// Check the save preconditions in the order the user sees them.
    pub fn history_save(&self) -> Result<HistorySave, &'static str> {
        let word = self.current_word().ok_or(NO_WORD_TO_SAVE)?;
        let list_id = self.history_list().ok_or(HISTORY_NOT_LOADED)?;
        Ok(HistorySave {
            list_id: list_id.clone(),
            word: word.word.clone(),
            definition: word.definition.clone(),
        })
    }
}
