mod intent;
mod reducer;
mod state;

pub use intent::LandingIntent;
pub use reducer::LandingReducer;
pub use state::{HistorySave, LandingState, HISTORY_NOT_LOADED, NO_WORD_TO_SAVE};
