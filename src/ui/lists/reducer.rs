use crate::ui::lists::intent::ListsIntent;
use crate::ui::lists::state::ListsState;
use crate::ui::loadable::Loadable;
use crate::ui::mvi::Reducer;

pub struct ListsReducer;

impl Reducer for ListsReducer {
    type State = ListsState;
    type Intent = ListsIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ListsIntent::Refresh => ListsState {
                lists: Loadable::Loading,
                ..state
            },
            ListsIntent::Loaded(lists) => {
                let selected = state.selected.min(lists.len().saturating_sub(1));
                ListsState {
                    lists: Loadable::Loaded(lists),
                    selected,
                    ..state
                }
            }
            ListsIntent::Failed(message) => ListsState {
                lists: Loadable::Failed(message),
                ..state
            },
            ListsIntent::MoveUp => {
                let len = state.lists.loaded().map_or(0, Vec::len);
                let selected = if len == 0 {
                    0
                } else if state.selected == 0 {
                    len - 1
                } else {
                    state.selected - 1
                };
                ListsState { selected, ..state }
            }
            ListsIntent::MoveDown => {
                let len = state.lists.loaded().map_or(0, Vec::len);
                let selected = if state.selected + 1 >= len {
                    0
                } else {
                    state.selected + 1
                };
                ListsState { selected, ..state }
            }
            ListsIntent::SaveStarted => ListsState {
                saving: true,
                ..state
            },
            ListsIntent::SaveFinished => ListsState {
                saving: false,
                ..state
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ListId, UserId, VocabList};

    fn list(id: &str, name: &str) -> VocabList {
        VocabList {
            id: ListId::new(id),
            user_id: UserId::new("1"),
            list_name: name.to_string(),
            created_at: None,
        }
    }

    fn loaded(n: usize) -> ListsState {
        let lists = (0..n).map(|i| list(&i.to_string(), "l")).collect();
        ListsReducer::reduce(ListsState::default(), ListsIntent::Loaded(lists))
    }

    #[test]
    fn selection_wraps() {
        let state = ListsReducer::reduce(loaded(3), ListsIntent::MoveUp);
        assert_eq!(state.selected, 2);
        let state = ListsReducer::reduce(state, ListsIntent::MoveDown);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn reload_clamps_selection() {
        let mut state = loaded(3);
        state.selected = 2;
        let state = ListsReducer::reduce(state, ListsIntent::Loaded(vec![list("a", "only")]));
        assert_eq!(state.selected, 0);
        assert_eq!(state.selected_list().unwrap().list_name, "only");
    }

    #[test]
    fn count_label_pluralizes() {
        assert_eq!(loaded(1).count_label().as_deref(), Some("1 list found"));
        assert_eq!(loaded(2).count_label().as_deref(), Some("2 lists found"));
        assert!(loaded(0).is_empty());
        assert_eq!(ListsState::default().count_label(), None);
    }

    #[test]
    fn empty_selection_is_none() {
        let state = ListsReducer::reduce(loaded(0), ListsIntent::MoveDown);
        assert_eq!(state.selected, 0);
        assert!(state.selected_list().is_none());
    }
}
