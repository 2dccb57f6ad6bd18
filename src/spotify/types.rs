//! Spotify Web API wire types (the subset this crate reads)

use serde::{Deserialize, Serialize};

/// A recommended or top track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

impl Track {
    /// Comma-joined artist names, for display.
    pub fn artist_line(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationsResponse {
    pub tracks: Vec<Track>,
}

/// `/v1/me/top/tracks` wraps the list in a paging object.
#[derive(Debug, Deserialize)]
pub(crate) struct TopTracksResponse {
    pub items: Vec<Track>,
}
