//! Wire payloads of the vocabulary backend.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ids::{ListId, UserId, WordId};

pub const NO_WORD: &str = "No word available";
pub const NO_DEFINITION: &str = "Definition not available.";
pub const OFFLINE_DEFINITION: &str = "Could not connect to server. Please check your backend.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabList {
    pub id: ListId,
    pub user_id: UserId,
    pub list_name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl VocabList {
    /// Creation date for display, `None` when absent or unparseable.
    pub fn created_date(&self) -> Option<NaiveDate> {
        self.created_at.as_deref().and_then(parse_date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordInList {
    pub id: WordId,
    pub list_id: ListId,
    pub user_id: UserId,
    pub word: String,
    pub definition: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl WordInList {
    pub fn created_date(&self) -> Option<NaiveDate> {
        self.created_at.as_deref().and_then(parse_date)
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| raw.get(..10).and_then(|d| d.parse().ok()))
}

/// Response of the exclude-history listing.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListsWithHistory {
    #[serde(default)]
    pub vocab_history_id: Option<ListId>,
    #[serde(default)]
    pub lists: Vec<VocabList>,
}

impl ListsWithHistory {
    /// Drops any entry carrying the history list id.
    pub(crate) fn without_history(mut self) -> Self {
        if let Some(history) = &self.vocab_history_id {
            self.lists.retain(|list| &list.id != history);
        }
        self
    }
}

/// Response of the words-in-list endpoint.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWords {
    #[serde(default)]
    pub words: Vec<WordInList>,
    #[serde(default)]
    pub list_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyWord {
    pub word: String,
    pub definition: String,
}

impl DailyWord {
    pub fn unavailable() -> Self {
        Self {
            word: NO_WORD.to_string(),
            definition: OFFLINE_DEFINITION.to_string(),
        }
    }

    /// True for the placeholder shown when no real word was fetched.
    pub fn is_placeholder(&self) -> bool {
        self.word == NO_WORD
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RandomWordResponse {
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub shortdef: Option<ShortDef>,
}

/// Dictionary short definitions arrive either as one string or as a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ShortDef {
    Text(String),
    Senses(Vec<String>),
}

impl From<RandomWordResponse> for DailyWord {
    fn from(raw: RandomWordResponse) -> Self {
        let word = raw
            .word
            .filter(|w| !w.trim().is_empty())
            .unwrap_or_else(|| NO_WORD.to_string());
        let definition = match raw.shortdef {
            Some(ShortDef::Text(text)) if !text.trim().is_empty() => text,
            Some(ShortDef::Senses(senses)) if !senses.is_empty() => senses.join("; "),
            _ => NO_DEFINITION.to_string(),
        };
        Self { word, definition }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    pub user_id: UserId,
}

/// Account details sent to the register endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub security_question: String,
    pub security_answer: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateListRequest<'a> {
    pub user_id: &'a UserId,
    pub list_name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddWordRequest<'a> {
    pub user_id: &'a UserId,
    pub list_id: &'a ListId,
    pub word: &'a str,
    pub definition: &'a str,
}

/// Result of a list deletion, one variant per status the backend documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteListOutcome {
    Deleted,
    NotFound,
    Forbidden,
    ServerError,
    Unexpected { status: u16, body: String },
}

impl DeleteListOutcome {
    pub fn from_response(status: u16, body: String) -> Self {
        match status {
            200 | 204 => Self::Deleted,
            404 => Self::NotFound,
            403 => Self::Forbidden,
            500 => Self::ServerError,
            _ => Self::Unexpected { status, body },
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Deleted => "Success",
            Self::NotFound => "List not found",
            Self::Forbidden => "Unauthorized",
            Self::ServerError => "Server error",
            Self::Unexpected { .. } => "Error",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Deleted => "List deleted successfully.".to_string(),
            Self::NotFound => "This list could not be found.".to_string(),
            Self::Forbidden => "You are not authorized to delete this list.".to_string(),
            Self::ServerError => "Server error, try again.".to_string(),
            Self::Unexpected { status, body } => {
                if body.trim().is_empty() {
                    format!("Unexpected response: {}", status)
                } else {
                    body.clone()
                }
            }
        }
    }

    /// Whether the list is gone and the user should be sent back to the
    /// list browser.
    pub fn returns_to_lists(&self) -> bool {
        matches!(self, Self::Deleted | Self::NotFound)
    }
}
