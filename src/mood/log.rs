//! Daily mood log: append-only, one entry per calendar day

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::MoodLabel;

/// One recorded mood. `day` is a monotonic counter starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodLogEntry {
    pub day: u32,
    pub mood: MoodLabel,
    pub logged_on: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoodLogError {
    #[error("mood already recorded for today")]
    AlreadyLoggedToday,
}

/// Append-only mood history. Entries are never edited or removed.
#[derive(Debug, Default, Clone, Serialize)]
pub struct MoodLog {
    entries: Vec<MoodLogEntry>,
}

impl MoodLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record today's mood. Rejects a second entry for the same day.
    pub fn submit(&mut self, mood: MoodLabel) -> Result<u32, MoodLogError> {
        self.submit_on(mood, Utc::now().date_naive())
    }

    /// Record a mood for an explicit date.
    ///
    /// Entries are appended in date order, so only the last entry can
    /// collide with the incoming date.
    pub fn submit_on(&mut self, mood: MoodLabel, date: NaiveDate) -> Result<u32, MoodLogError> {
        if self.entries.last().is_some_and(|e| e.logged_on == date) {
            return Err(MoodLogError::AlreadyLoggedToday);
        }

        let day = self.entries.len() as u32 + 1;
        self.entries.push(MoodLogEntry { day, mood, logged_on: date });
        Ok(day)
    }

    pub fn entries(&self) -> &[MoodLogEntry] {
        &self.entries
    }
}
