//! Request/response types for the HTTP API

use serde::{Deserialize, Serialize};

use crate::chat::ChatTurn;
use crate::mood::{MoodLabel, MoodLogEntry};
use crate::spotify::Track;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub authenticated: bool,
}

#[derive(Debug, Serialize)]
pub struct AuthLinkResponse {
    pub url: String,
}

/// Query parameters delivered by the authorization-server redirect.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    pub mood: MoodLabel,
    /// Optional comma-separated seed genres; defaults to the mood's own.
    pub genres: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub mood: MoodLabel,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Serialize)]
pub struct TopTracksResponse {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitMoodRequest {
    pub mood: MoodLabel,
}

#[derive(Debug, Serialize)]
pub struct SubmitMoodResponse {
    pub day: u32,
}

#[derive(Debug, Serialize)]
pub struct MoodLogResponse {
    pub entries: Vec<MoodLogEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ChatMessageRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatMessageResponse {
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub turns: Vec<ChatTurn>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}
