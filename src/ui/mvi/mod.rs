//! State / intent / reducer primitives shared by every screen.
//!
//! Each screen family (`form`, `google`, `landing`, `lists`, `words`) owns a
//! state struct, an intent enum and a reducer implementing [`Reducer`]. The
//! `App` feeds intents in; side effects never happen inside a reducer, they
//! are issued by the `App` as commands and come back as new intents.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
