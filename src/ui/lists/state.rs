use crate::api::VocabList;
use crate::ui::loadable::{plural, Loadable};
use crate::ui::mvi::UiState;

/// A selectable list of vocabulary lists, shared by the picker and the
/// browser.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListsState {
    pub lists: Loadable<Vec<VocabList>>,
    pub selected: usize,
    /// A word is being saved into the selected list.
    pub saving: bool,
}

impl UiState for ListsState {}

impl ListsState {
    pub fn selected_list(&self) -> Option<&VocabList> {
        self.lists.loaded().and_then(|lists| lists.get(self.selected))
    }

    pub fn is_empty(&self) -> bool {
        self.lists.loaded().is_some_and(Vec::is_empty)
    }

    pub fn count_label(&self) -> Option<String> {
        self.lists
            .loaded()
            .map(|lists| format!("{} found", plural(lists.len(), "list", "lists")))
    }
}
