//! HTTP API for the presentation shell
//!
//! Endpoints:
//! - GET  /api/status            - health + authentication state
//! - GET  /api/auth/link         - begin the OAuth flow, returns the link
//! - GET  /callback              - redirect-URI target, consumes the code
//! - GET  /api/recommendations   - mood-tagged track recommendations
//! - GET  /api/tracks/top        - the user's top tracks
//! - POST /api/mood              - record today's mood
//! - GET  /api/mood              - the mood log
//! - POST /api/chat              - send a chat turn to Melody
//! - GET  /api/chat              - the visible transcript

mod error;
mod handlers;
pub mod types;

pub use error::ApiError;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{AuthFlow, TokenStore};
use crate::chat::{ChatManager, GeminiProvider, GenerationConfig, Provider};
use crate::config::MoodifyConfig;
use crate::mood::MoodLog;
use crate::spotify::SpotifyClient;

/// Everything a handler can reach. One instance per process; the session
/// state (token slot, transcript, mood log) lives here rather than in
/// ambient globals.
pub struct AppState {
    pub auth: AuthFlow,
    pub spotify: SpotifyClient,
    pub chat: ChatManager,
    pub mood_log: RwLock<MoodLog>,
    pub config: MoodifyConfig,
}

impl AppState {
    /// Wire the production components from configuration.
    pub fn new(config: MoodifyConfig) -> Self {
        let provider = Arc::new(GeminiProvider::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            GenerationConfig::default(),
        ));
        Self::with_provider(config, provider)
    }

    /// Same wiring with an injected chat provider (test seam).
    pub fn with_provider(config: MoodifyConfig, provider: Arc<dyn Provider>) -> Self {
        let tokens = Arc::new(TokenStore::new());
        let timeout = Duration::from_secs(config.request_timeout_secs);

        Self {
            auth: AuthFlow::new(&config, tokens.clone()),
            spotify: SpotifyClient::new(config.spotify_api_base_url.clone(), timeout, tokens),
            chat: ChatManager::new(provider, crate::chat::DEFAULT_SYSTEM_PROMPT),
            mood_log: RwLock::new(MoodLog::new()),
            config,
        }
    }
}

/// Build the router with CORS, tracing, and a request timeout.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = match state.config.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new().allow_origin(origin),
        Err(_) => CorsLayer::new().allow_origin(Any),
    }
    .allow_methods(Any)
    .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::status))
        .route("/api/status", get(handlers::status))
        .route("/api/auth/link", get(handlers::auth_link))
        .route("/callback", get(handlers::auth_callback))
        .route("/api/recommendations", get(handlers::recommendations))
        .route("/api/tracks/top", get(handlers::top_tracks))
        .route("/api/mood", post(handlers::submit_mood).get(handlers::mood_log))
        .route("/api/chat", post(handlers::chat_message).get(handlers::chat_transcript))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(60)))
        .layer(cors)
        .with_state(state)
}
