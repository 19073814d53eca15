use crate::api::{DailyWord, ListId};
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum LandingIntent {
    WordRequested,
    WordLoaded(DailyWord),
    HistoryLoaded(Option<ListId>),
    HistoryFailed(String),
    SaveStarted,
    SaveFinished,
}

impl Intent for LandingIntent {}
