//! HTTP handlers: thin wrappers over the library components

use axum::Json;
use axum::extract::{Query, State};
use axum::response::Redirect;
use std::sync::Arc;
use tracing::{info, warn};

use super::AppState;
use super::error::ApiError;
use super::types::*;

pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        authenticated: state.auth.is_authenticated().await,
    })
}

/// Start a new authorization flow and hand the link to the shell.
/// Any previously held token is dropped.
pub async fn auth_link(State(state): State<Arc<AppState>>) -> Result<Json<AuthLinkResponse>, ApiError> {
    let url = state.auth.begin().await?;
    Ok(Json(AuthLinkResponse { url: url.into() }))
}

/// The redirect-URI endpoint. Consumes the one-time code, then answers with
/// a redirect so the browser drops the leftover query parameters and a
/// reload of the landing page cannot re-trigger the exchange.
pub async fn auth_callback(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CallbackQuery>,
) -> Result<Redirect, ApiError> {
    if let Some(error) = query.error {
        warn!("authorization denied: {}", error);
        return Err(ApiError::AuthExchangeFailed(format!(
            "authorization denied: {}",
            error
        )));
    }

    let outcome = state.auth.handle_callback(query.code.as_deref()).await?;
    info!(?outcome, "authorization callback handled");
    Ok(Redirect::to("/"))
}

pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecommendationsQuery>,
) -> Result<Json<RecommendationsResponse>, ApiError> {
    let mood = query.mood;
    let genres: Vec<String> = match &query.genres {
        Some(list) => list.split(',').map(|g| g.trim().to_string()).collect(),
        None => vec![mood.seed_genre().to_string()],
    };

    let tracks = state.spotify.recommendations(mood.targets(), &genres).await?;
    Ok(Json(RecommendationsResponse { mood, tracks }))
}

pub async fn top_tracks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TopTracksResponse>, ApiError> {
    let tracks = state.spotify.top_tracks().await?;
    Ok(Json(TopTracksResponse { tracks }))
}

pub async fn submit_mood(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SubmitMoodRequest>,
) -> Result<Json<SubmitMoodResponse>, ApiError> {
    let day = state.mood_log.write().await.submit(request.mood)?;
    info!(mood = %request.mood, day, "mood recorded");
    Ok(Json(SubmitMoodResponse { day }))
}

pub async fn mood_log(State(state): State<Arc<AppState>>) -> Json<MoodLogResponse> {
    let entries = state.mood_log.read().await.entries().to_vec();
    Json(MoodLogResponse { entries })
}

pub async fn chat_message(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatMessageRequest>,
) -> Result<Json<ChatMessageResponse>, ApiError> {
    let reply = state.chat.send(&request.message).await?;
    Ok(Json(ChatMessageResponse { reply }))
}

/// The visible transcript. Initializes the session on first visit so the
/// greeting is already there when the page renders.
pub async fn chat_transcript(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    state.chat.ensure_initialized().await?;
    let turns = state.chat.visible_transcript().await;
    Ok(Json(TranscriptResponse { turns }))
}
