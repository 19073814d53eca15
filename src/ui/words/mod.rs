mod intent;
mod reducer;
mod state;

pub use intent::WordsIntent;
pub use reducer::WordsReducer;
pub use state::{WordsState, DELETE_CONFIRM_MESSAGE, DELETE_CONFIRM_TITLE};
