//! Authorization-code flow against a local mock authorization server

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use moodify::auth::{AuthError, AuthFlow, AuthPhase, CallbackOutcome, TokenStore};
use moodify::config::MoodifyConfig;

/// Mock `/api/token` endpoint: counts exchanges, answers with `status`.
async fn spawn_token_server(status: StatusCode) -> (String, Arc<AtomicUsize>) {
    let exchanges = Arc::new(AtomicUsize::new(0));
    let counter = exchanges.clone();

    let app = Router::new().route(
        "/api/token",
        post(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                if status.is_success() {
                    (status, Json(json!({ "access_token": "mock-token" }))).into_response()
                } else {
                    (status, Json(json!({ "error": "invalid_grant" }))).into_response()
                }
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), exchanges)
}

fn config_for(base_url: &str) -> MoodifyConfig {
    MoodifyConfig {
        spotify_client_id: "test-client".to_string(),
        spotify_client_secret: "test-secret".to_string(),
        spotify_redirect_uri: "http://localhost:8888/callback".to_string(),
        spotify_auth_base_url: base_url.to_string(),
        spotify_api_base_url: base_url.to_string(),
        spotify_scopes: "user-top-read user-read-private".to_string(),
        gemini_api_key: "unused".to_string(),
        gemini_model: "gemini-1.5-flash".to_string(),
        request_timeout_secs: 2,
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origin: "http://localhost:3000".to_string(),
        debug_log_token: false,
    }
}

#[tokio::test]
async fn test_callback_exchanges_code_exactly_once() {
    let (base_url, exchanges) = spawn_token_server(StatusCode::OK).await;
    let tokens = Arc::new(TokenStore::new());
    let flow = AuthFlow::new(&config_for(&base_url), tokens.clone());

    flow.begin().await.unwrap();

    let outcome = flow.handle_callback(Some("code-abc")).await.unwrap();
    assert_eq!(outcome, CallbackOutcome::Completed);
    assert_eq!(flow.phase().await, AuthPhase::Authenticated);
    assert_eq!(tokens.get().unwrap().secret(), "mock-token");

    // A re-rendered page delivering the same leftover code must be a no-op
    let outcome = flow.handle_callback(Some("code-abc")).await.unwrap();
    assert_eq!(outcome, CallbackOutcome::AlreadyAuthenticated);
    assert_eq!(exchanges.load(Ordering::SeqCst), 1);
    assert_eq!(tokens.get().unwrap().secret(), "mock-token");
}

#[tokio::test]
async fn test_rejected_exchange_leaves_flow_unauthenticated() {
    let (base_url, exchanges) = spawn_token_server(StatusCode::BAD_REQUEST).await;
    let tokens = Arc::new(TokenStore::new());
    let flow = AuthFlow::new(&config_for(&base_url), tokens.clone());

    flow.begin().await.unwrap();
    let err = flow.handle_callback(Some("bad-code")).await.unwrap_err();

    assert!(matches!(err, AuthError::ExchangeFailed { status: 400 }));
    assert_eq!(flow.phase().await, AuthPhase::Unauthenticated);
    assert!(tokens.get().is_none());
    assert_eq!(exchanges.load(Ordering::SeqCst), 1);

    // The flow can restart: the link is re-shown and a fresh code works
    flow.begin().await.unwrap();
    assert_eq!(flow.phase().await, AuthPhase::AwaitingCallback);
}

#[tokio::test]
async fn test_begin_invalidates_previous_token() {
    let (base_url, _exchanges) = spawn_token_server(StatusCode::OK).await;
    let tokens = Arc::new(TokenStore::new());
    let flow = AuthFlow::new(&config_for(&base_url), tokens.clone());

    flow.begin().await.unwrap();
    flow.handle_callback(Some("code-1")).await.unwrap();
    assert!(tokens.is_present());

    // Starting a new flow drops the old token until the new exchange lands
    flow.begin().await.unwrap();
    assert!(tokens.get().is_none());
    assert_eq!(flow.phase().await, AuthPhase::AwaitingCallback);
}

#[tokio::test]
async fn test_client_credentials_grant() {
    let (base_url, exchanges) = spawn_token_server(StatusCode::OK).await;
    let tokens = Arc::new(TokenStore::new());
    let flow = AuthFlow::new(&config_for(&base_url), tokens.clone());

    flow.request_app_token().await.unwrap();

    assert_eq!(flow.phase().await, AuthPhase::Authenticated);
    assert_eq!(tokens.get().unwrap().secret(), "mock-token");
    assert_eq!(exchanges.load(Ordering::SeqCst), 1);
}
