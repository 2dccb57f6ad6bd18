//! Authorization-code flow against the Spotify accounts service
//!
//! Drives the three-step exchange: build the authorization link, receive the
//! redirect callback carrying a one-time code, and trade the code for a
//! bearer token. Repeated callbacks with an already-consumed code are
//! harmless: the phase check runs under the same lock as the exchange, so a
//! page re-rendered with leftover query parameters performs at most one
//! token request.

use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

use super::token::{AccessToken, TokenStore};
use crate::config::MoodifyConfig;

/// Where the session stands in the authorization-code exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Unauthenticated,
    AwaitingCallback,
    Authenticated,
}

/// What a redirect callback did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// A code was exchanged and the session is now authenticated.
    Completed,
    /// The session already held a token; the incoming code was ignored.
    AlreadyAuthenticated,
    /// The callback carried no authorization code.
    NoCode,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("token exchange rejected with status {status}")]
    ExchangeFailed { status: u16 },

    #[error("authorization server unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid authorization endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Authorization-code flow controller.
pub struct AuthFlow {
    http: HttpClient,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    base_url: String,
    scopes: String,
    timeout: Duration,
    debug_log_token: bool,
    tokens: Arc<TokenStore>,
    // Guards the phase AND serializes callback handling across handlers.
    phase: Mutex<AuthPhase>,
}

impl AuthFlow {
    pub fn new(config: &MoodifyConfig, tokens: Arc<TokenStore>) -> Self {
        Self {
            http: HttpClient::new(),
            client_id: config.spotify_client_id.clone(),
            client_secret: config.spotify_client_secret.clone(),
            redirect_uri: config.spotify_redirect_uri.clone(),
            base_url: config.spotify_auth_base_url.clone(),
            scopes: config.spotify_scopes.clone(),
            timeout: Duration::from_secs(config.request_timeout_secs),
            debug_log_token: config.debug_log_token,
            tokens,
            phase: Mutex::new(AuthPhase::Unauthenticated),
        }
    }

    pub async fn phase(&self) -> AuthPhase {
        *self.phase.lock().await
    }

    pub async fn is_authenticated(&self) -> bool {
        self.phase().await == AuthPhase::Authenticated
    }

    /// Start (or restart) the flow: drop any held token and build the
    /// authorization link the user must visit.
    ///
    /// `show_dialog=true` forces the consent screen on every visit.
    pub async fn begin(&self) -> Result<Url, AuthError> {
        let mut phase = self.phase.lock().await;
        self.tokens.clear();
        *phase = AuthPhase::AwaitingCallback;

        let url = Url::parse_with_params(
            &format!("{}/authorize", self.base_url),
            &[
                ("client_id", self.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("scope", self.scopes.as_str()),
                ("show_dialog", "true"),
            ],
        )?;
        Ok(url)
    }

    /// Consume a redirect callback.
    ///
    /// Exchanges the code unless the session is already authenticated, in
    /// which case the code is ignored so a stale redirect cannot overwrite
    /// a valid token.
    pub async fn handle_callback(&self, code: Option<&str>) -> Result<CallbackOutcome, AuthError> {
        let mut phase = self.phase.lock().await;

        if *phase == AuthPhase::Authenticated {
            debug!("callback received while authenticated; ignoring code");
            return Ok(CallbackOutcome::AlreadyAuthenticated);
        }

        let Some(code) = code else {
            return Ok(CallbackOutcome::NoCode);
        };

        match self.exchange_code(code).await {
            Ok(token) => {
                if self.debug_log_token {
                    debug!(token = token.secret(), "authorization-code exchange succeeded");
                }
                self.tokens.set(token);
                *phase = AuthPhase::Authenticated;
                info!("Spotify session authenticated");
                Ok(CallbackOutcome::Completed)
            }
            Err(e) => {
                *phase = AuthPhase::Unauthenticated;
                warn!("token exchange failed: {}", e);
                Err(e)
            }
        }
    }

    /// App-only access via the client-credentials grant. No user consent,
    /// no resource-owner scopes.
    pub async fn request_app_token(&self) -> Result<(), AuthError> {
        let mut phase = self.phase.lock().await;

        let token = self
            .token_request(&[("grant_type", "client_credentials")])
            .await?;
        self.tokens.set(token);
        *phase = AuthPhase::Authenticated;
        info!("app-only Spotify token acquired");
        Ok(())
    }

    async fn exchange_code(&self, code: &str) -> Result<AccessToken, AuthError> {
        self.token_request(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
        ])
        .await
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<AccessToken, AuthError> {
        let response = self
            .http
            .post(format!("{}/api/token", self.base_url))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(form)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::ExchangeFailed {
                status: response.status().as_u16(),
            });
        }

        let body: TokenResponse = response.json().await?;
        Ok(AccessToken::new(body.access_token))
    }
}
