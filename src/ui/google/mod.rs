mod intent;
mod reducer;
mod state;

pub use intent::GoogleIntent;
pub use reducer::GoogleReducer;
pub use state::GoogleState;
