//! Remote vocabulary backend: identifiers, payloads, errors and the client.

mod client;
mod error;
mod ids;
mod types;

pub use client::VocabApi;
pub use error::{ApiError, ServerErrorKind};
pub use ids::{ListId, UserId, WordId};
pub use types::{
    DailyWord, DeleteListOutcome, ListWords, ListsWithHistory, Registration, VocabList,
    WordInList, NO_DEFINITION, NO_WORD, OFFLINE_DEFINITION,
};
