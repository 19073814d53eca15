use crate::ui::form::intent::FormIntent;
use crate::ui::form::state::FormState;
use crate::ui::mvi::Reducer;

pub struct FormReducer;

impl Reducer for FormReducer {
    type State = FormState;
    type Intent = FormIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FormIntent::SubmitStarted => {
                state.submitting = true;
                return state;
            }
            FormIntent::SubmitFinished => {
                state.submitting = false;
                return state;
            }
            _ if state.submitting => return state,
            _ => {}
        }

        let len = state.fields.len();
        match intent {
            FormIntent::Input(ch) if !ch.is_control() => {
                if let Some(field) = state.fields.get_mut(state.focused) {
                    field.value.push(ch);
                }
            }
            FormIntent::Paste(text) => {
                if let Some(field) = state.fields.get_mut(state.focused) {
                    // Single-line fields: keep only the first line.
                    let line = text.lines().next().unwrap_or("");
                    field.value.push_str(line);
                }
            }
            FormIntent::Backspace => {
                if let Some(field) = state.fields.get_mut(state.focused) {
                    field.value.pop();
                }
            }
            FormIntent::ClearField => {
                if let Some(field) = state.fields.get_mut(state.focused) {
                    field.value.clear();
                }
            }
            FormIntent::FocusNext if len > 0 => {
                state.focused = (state.focused + 1) % len;
            }
            FormIntent::FocusPrev if len > 0 => {
                state.focused = if state.focused == 0 {
                    len - 1
                } else {
                    state.focused - 1
                };
            }
            _ => {}
        }
        state
    }
}
