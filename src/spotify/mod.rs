//! Spotify resource-server client
//!
//! One bearer-authorized GET per operation, no retries. A missing token
//! short-circuits before any network traffic.

mod types;

pub use types::{Artist, ExternalUrls, Track};

use reqwest::Client as HttpClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::auth::TokenStore;
use crate::mood::RecommendationParams;
use types::{RecommendationsResponse, TopTracksResponse};

#[derive(Debug, thiserror::Error)]
pub enum SpotifyError {
    /// No token in the store; prompt the user to reconnect.
    #[error("not connected to Spotify")]
    AuthRequired,

    /// Non-success status from the resource server. Recoverable; no retry.
    #[error("Spotify API responded with status {status}")]
    Upstream { status: u16 },

    /// Connection, timeout, or body-decode failure.
    #[error("Spotify request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

pub struct SpotifyClient {
    http: HttpClient,
    base_url: String,
    timeout: Duration,
    tokens: Arc<TokenStore>,
}

impl SpotifyClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration, tokens: Arc<TokenStore>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into(),
            timeout,
            tokens,
        }
    }

    /// Fetch mood-tagged recommendations.
    ///
    /// `seed_genres` are joined into the comma-separated list the endpoint
    /// expects; the target parameters come straight from the mood table.
    pub async fn recommendations(
        &self,
        params: RecommendationParams,
        seed_genres: &[String],
    ) -> Result<Vec<Track>, SpotifyError> {
        let token = self.tokens.get().ok_or(SpotifyError::AuthRequired)?;

        let response = self
            .http
            .get(format!("{}/v1/recommendations", self.base_url))
            .query(&[
                ("seed_genres", seed_genres.join(",")),
                ("target_energy", params.energy.to_string()),
                ("target_valence", params.valence.to_string()),
            ])
            .bearer_auth(token.secret())
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SpotifyError::Upstream {
                status: response.status().as_u16(),
            });
        }

        let body: RecommendationsResponse = response.json().await?;
        debug!(count = body.tracks.len(), "recommendations fetched");
        Ok(body.tracks)
    }

    /// The authenticated user's top tracks.
    pub async fn top_tracks(&self) -> Result<Vec<Track>, SpotifyError> {
        let token = self.tokens.get().ok_or(SpotifyError::AuthRequired)?;

        let response = self
            .http
            .get(format!("{}/v1/me/top/tracks", self.base_url))
            .bearer_auth(token.secret())
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SpotifyError::Upstream {
                status: response.status().as_u16(),
            });
        }

        let body: TopTracksResponse = response.json().await?;
        Ok(body.items)
    }
}
