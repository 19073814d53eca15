use crate::ui::landing::intent::LandingIntent;
use crate::ui::landing::state::LandingState;
use crate::ui::loadable::Loadable;
use crate::ui::mvi::Reducer;

pub struct LandingReducer;

impl Reducer for LandingReducer {
    type State = LandingState;
    type Intent = LandingIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            LandingIntent::WordRequested => LandingState {
                word: Loadable::Loading,
                ..state
            },
            LandingIntent::WordLoaded(word) => LandingState {
                word: Loadable::Loaded(word),
                ..state
            },
            LandingIntent::HistoryLoaded(id) => LandingState {
                history: Loadable::Loaded(id),
                ..state
            },
            LandingIntent::HistoryFailed(message) => LandingState {
                history: Loadable::Failed(message),
                ..state
            },
            LandingIntent::SaveStarted => LandingState {
                saving: true,
                ..state
            },
            LandingIntent::SaveFinished => LandingState {
                saving: false,
                ..state
            },
        }
    }
}
