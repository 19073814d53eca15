use crate::api::WordInList;
use crate::ui::loadable::{plural, Loadable};
use crate::ui::mvi::UiState;

pub const DELETE_CONFIRM_TITLE: &str = "Delete this list and all words?";
pub const DELETE_CONFIRM_MESSAGE: &str = "This cannot be undone.";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WordsState {
    /// Header text; replaced by the server's name once words load.
    pub list_name: String,
    pub words: Loadable<Vec<WordInList>>,
    pub scroll: usize,
    pub confirm_delete: bool,
    pub deleting: bool,
}

impl UiState for WordsState {}

impl WordsState {
    pub fn new(list_name: impl Into<String>) -> Self {
        Self {
            list_name: list_name.into(),
            ..Self::default()
        }
    }

    pub fn count_label(&self) -> Option<String> {
        self.words
            .loaded()
            .map(|words| format!("{} in this list", plural(words.len(), "word", "words")))
    }

    pub fn title(&self) -> &str {
        if self.list_name.trim().is_empty() {
            "Vocab List"
        } else {
            &self.list_name
        }
    }
}
