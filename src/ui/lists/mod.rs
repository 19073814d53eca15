//! List picker, list browser and list creation.

mod intent;
mod reducer;
mod state;

pub use intent::ListsIntent;
pub use reducer::ListsReducer;
pub use state::ListsState;

use crate::ui::form::{FormState, TextField};

pub const LIST_NAME_MISSING: &str = "Please enter a list name.";

pub fn list_creation_form() -> FormState {
    FormState::new(vec![TextField::new("List name")])
}

/// Trimmed list name, or the alert text when it is blank.
pub fn list_name_request(form: &FormState) -> Result<String, &'static str> {
    let name = form.value(0).trim();
    if name.is_empty() {
        return Err(LIST_NAME_MISSING);
    }
    Ok(name.to_string())
}
