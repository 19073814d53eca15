use crate::ui::loadable::Loadable;
use crate::ui::mvi::Reducer;
use crate::ui::words::intent::WordsIntent;
use crate::ui::words::state::WordsState;

pub struct WordsReducer;

impl Reducer for WordsReducer {
    type State = WordsState;
    type Intent = WordsIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            WordsIntent::Refresh => WordsState {
                words: Loadable::Loading,
                ..state
            },
            WordsIntent::Loaded(response) => {
                let list_name = response
                    .list_name
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or(state.list_name);
                let scroll = state.scroll.min(response.words.len().saturating_sub(1));
                WordsState {
                    list_name,
                    words: Loadable::Loaded(response.words),
                    scroll,
                    ..state
                }
            }
            WordsIntent::Failed(message) => WordsState {
                words: Loadable::Failed(message),
                ..state
            },
            WordsIntent::ScrollUp => WordsState {
                scroll: state.scroll.saturating_sub(1),
                ..state
            },
            WordsIntent::ScrollDown => {
                let len = state.words.loaded().map_or(0, Vec::len);
                let scroll = (state.scroll + 1).min(len.saturating_sub(1));
                WordsState { scroll, ..state }
            }
            WordsIntent::RequestDelete if !state.deleting => WordsState {
                confirm_delete: true,
                ..state
            },
            WordsIntent::RequestDelete => state,
            WordsIntent::CancelDelete => WordsState {
                confirm_delete: false,
                ..state
            },
            WordsIntent::DeleteStarted => WordsState {
                confirm_delete: false,
                deleting: true,
                ..state
            },
            WordsIntent::DeleteFinished => WordsState {
                deleting: false,
                ..state
            },
        }
    }
}
