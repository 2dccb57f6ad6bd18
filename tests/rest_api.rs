//! Router-level tests with a scripted chat provider

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use moodify::chat::{ChatRequest, Provider, ProviderError};
use moodify::config::MoodifyConfig;
use moodify::server::{AppState, create_router};

/// Chat provider double with a fixed reply.
struct ScriptedProvider;

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn send(&self, _request: ChatRequest) -> Result<String, ProviderError> {
        Ok("scripted reply".to_string())
    }
}

fn test_config() -> MoodifyConfig {
    MoodifyConfig {
        spotify_client_id: "test-client".to_string(),
        spotify_client_secret: "test-secret".to_string(),
        spotify_redirect_uri: "http://localhost:8888/callback".to_string(),
        // Unroutable: nothing in these tests may reach a real upstream
        spotify_auth_base_url: "http://127.0.0.1:9".to_string(),
        spotify_api_base_url: "http://127.0.0.1:9".to_string(),
        spotify_scopes: "user-top-read user-read-private".to_string(),
        gemini_api_key: "unused".to_string(),
        gemini_model: "gemini-1.5-flash".to_string(),
        request_timeout_secs: 1,
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origin: "http://localhost:3000".to_string(),
        debug_log_token: false,
    }
}

fn test_router() -> axum::Router {
    let state = Arc::new(AppState::with_provider(test_config(), Arc::new(ScriptedProvider)));
    create_router(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_status_reports_unauthenticated() {
    let app = test_router();
    let response = app.oneshot(get("/api/status")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["authenticated"], false);
}

#[tokio::test]
async fn test_auth_link_points_at_authorize_endpoint() {
    let app = test_router();
    let response = app.oneshot(get("/api/auth/link")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let url = body["url"].as_str().unwrap();
    assert!(url.contains("/authorize?"));
    assert!(url.contains("client_id=test-client"));
    assert!(url.contains("show_dialog=true"));
    assert!(url.contains("response_type=code"));
}

#[tokio::test]
async fn test_callback_without_code_redirects_home() {
    let app = test_router();
    let response = app.oneshot(get("/callback")).await.unwrap();

    // The redirect strips leftover query parameters from the browser URL
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
}

#[tokio::test]
async fn test_callback_with_denied_consent_is_unauthorized() {
    let app = test_router();
    let response = app
        .oneshot(get("/callback?error=access_denied"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "auth_exchange_failed");
}

#[tokio::test]
async fn test_recommendations_require_auth() {
    let app = test_router();
    let response = app
        .oneshot(get("/api/recommendations?mood=happy"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "auth_required");
}

#[tokio::test]
async fn test_unknown_mood_is_rejected() {
    let app = test_router();
    let response = app
        .oneshot(get("/api/recommendations?mood=euphoric"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_mood_submit_then_duplicate_conflicts() {
    let app = test_router();

    let response = app
        .clone()
        .oneshot(post_json("/api/mood", json!({ "mood": "happy" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["day"], 1);

    // Same day, different mood: the guard rejects the duplicate
    let response = app
        .clone()
        .oneshot(post_json("/api/mood", json!({ "mood": "calm" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"], "already_logged_today");

    // The rejected submit did not touch the log
    let response = app.clone().oneshot(get("/api/mood")).await.unwrap();
    let body = body_json(response).await;
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["mood"], "happy");
    assert_eq!(entries[0]["day"], 1);
}

#[tokio::test]
async fn test_chat_transcript_hides_system_turn() {
    let app = test_router();

    // First visit initializes the session: greeting present, system hidden
    let response = app.clone().oneshot(get("/api/chat")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let turns = body["turns"].as_array().unwrap();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0]["role"], "assistant");

    let response = app
        .clone()
        .oneshot(post_json("/api/chat", json!({ "message": "I feel happy" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["reply"], "scripted reply");

    let response = app.clone().oneshot(get("/api/chat")).await.unwrap();
    let body = body_json(response).await;
    let turns = body["turns"].as_array().unwrap();
    // greeting + user turn + assistant turn, no system turn anywhere
    assert_eq!(turns.len(), 3);
    assert!(turns.iter().all(|t| t["role"] != "system"));
    assert_eq!(turns[1]["role"], "user");
    assert_eq!(turns[1]["content"], "I feel happy");
}
