//! Mood labels and the fixed mood → recommendation-parameter table
//!
//! The label set is closed: every mood the application knows about is a
//! variant here, and everything downstream (seed genres, target parameters,
//! the daily log) dispatches on this enum rather than on raw UI strings.

mod log;

pub use log::{MoodLog, MoodLogEntry, MoodLogError};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user-selectable mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodLabel {
    Happy,
    Energetic,
    Calm,
    Melancholic,
}

/// Target audio features passed to the recommendation endpoint.
///
/// Both values are in [0, 1] and come only from the fixed table below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendationParams {
    pub energy: f32,
    pub valence: f32,
}

impl MoodLabel {
    pub const ALL: [MoodLabel; 4] = [
        MoodLabel::Happy,
        MoodLabel::Energetic,
        MoodLabel::Calm,
        MoodLabel::Melancholic,
    ];

    /// Map this mood to its target energy/valence pair.
    ///
    /// Total over the enum; there is no fallback row.
    pub fn targets(self) -> RecommendationParams {
        match self {
            MoodLabel::Happy => RecommendationParams { energy: 0.7, valence: 0.8 },
            MoodLabel::Energetic => RecommendationParams { energy: 0.9, valence: 0.7 },
            MoodLabel::Calm => RecommendationParams { energy: 0.4, valence: 0.5 },
            MoodLabel::Melancholic => RecommendationParams { energy: 0.3, valence: 0.2 },
        }
    }

    /// Default seed genre for the recommendation call (the lowercase label).
    pub fn seed_genre(self) -> &'static str {
        self.as_str()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MoodLabel::Happy => "happy",
            MoodLabel::Energetic => "energetic",
            MoodLabel::Calm => "calm",
            MoodLabel::Melancholic => "melancholic",
        }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for strings outside the closed mood set. Parsing never defaults.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mood label: {0:?}")]
pub struct UnknownMood(pub String);

impl FromStr for MoodLabel {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "happy" => Ok(MoodLabel::Happy),
            "energetic" => Ok(MoodLabel::Energetic),
            "calm" => Ok(MoodLabel::Calm),
            "melancholic" => Ok(MoodLabel::Melancholic),
            _ => Err(UnknownMood(s.to_string())),
        }
    }
}
