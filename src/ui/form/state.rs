use crate::ui::mvi::UiState;

/// One single-line text input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextField {
    pub label: &'static str,
    pub value: String,
    /// Render as bullets (passwords).
    pub masked: bool,
}

impl TextField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: false,
        }
    }

    pub fn masked(label: &'static str) -> Self {
        Self {
            masked: true,
            ..Self::new(label)
        }
    }

    /// Text to draw in place of the value.
    pub fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// A vertical stack of text fields with one focused.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormState {
    pub fields: Vec<TextField>,
    pub focused: usize,
    /// A submission is in flight; edits and resubmits are ignored.
    pub submitting: bool,
}

impl UiState for FormState {}

impl FormState {
    pub fn new(fields: Vec<TextField>) -> Self {
        Self {
            fields,
            focused: 0,
            submitting: false,
        }
    }

    /// Raw value of field `index`, empty when out of range.
    pub fn value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|field| field.value.as_str())
            .unwrap_or("")
    }

    pub fn any_blank(&self) -> bool {
        self.fields.iter().any(TextField::is_blank)
    }
}
