//! Error taxonomy → HTTP status mapping
//!
//! Nothing here is fatal to the process: every failure becomes a JSON body
//! the shell can show. 401 means "reconnect to Spotify", 409 means the
//! mood log guard tripped, 502 means an upstream said no (or never
//! answered).

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::types::ErrorBody;
use crate::auth::AuthError;
use crate::chat::ChatError;
use crate::mood::MoodLogError;
use crate::spotify::SpotifyError;

#[derive(Debug)]
pub enum ApiError {
    /// No token yet; the shell should show the authorization link.
    AuthRequired,
    /// The code exchange was rejected (or the user denied consent).
    AuthExchangeFailed(String),
    /// Upstream answered with a non-success status.
    Upstream { status: u16 },
    /// Upstream unreachable or timed out.
    Transport(String),
    /// Duplicate mood entry for today.
    AlreadyLoggedToday,
    /// The hosted model call failed for this turn.
    Model(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::AuthRequired => (
                StatusCode::UNAUTHORIZED,
                "auth_required",
                "connect to Spotify first".to_string(),
            ),
            ApiError::AuthExchangeFailed(message) => {
                (StatusCode::UNAUTHORIZED, "auth_exchange_failed", message)
            }
            ApiError::Upstream { status } => (
                StatusCode::BAD_GATEWAY,
                "upstream_error",
                format!("upstream responded with status {}", status),
            ),
            ApiError::Transport(message) => (StatusCode::BAD_GATEWAY, "upstream_error", message),
            ApiError::AlreadyLoggedToday => (
                StatusCode::CONFLICT,
                "already_logged_today",
                "today's mood is already recorded".to_string(),
            ),
            ApiError::Model(message) => (StatusCode::BAD_GATEWAY, "model_error", message),
        };

        (status, Json(ErrorBody { error, message })).into_response()
    }
}

impl From<SpotifyError> for ApiError {
    fn from(e: SpotifyError) -> Self {
        match e {
            SpotifyError::AuthRequired => ApiError::AuthRequired,
            SpotifyError::Upstream { status } => ApiError::Upstream { status },
            SpotifyError::Transport(e) => ApiError::Transport(e.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::ExchangeFailed { .. } => ApiError::AuthExchangeFailed(e.to_string()),
            AuthError::Transport(e) => ApiError::Transport(e.to_string()),
            AuthError::InvalidEndpoint(e) => ApiError::Transport(e.to_string()),
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(e: ChatError) -> Self {
        ApiError::Model(e.to_string())
    }
}

impl From<MoodLogError> for ApiError {
    fn from(e: MoodLogError) -> Self {
        match e {
            MoodLogError::AlreadyLoggedToday => ApiError::AlreadyLoggedToday,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::AuthRequired.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::AlreadyLoggedToday.into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Upstream { status: 503 }.into_response().status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_spotify_error_conversion() {
        let api: ApiError = SpotifyError::AuthRequired.into();
        assert!(matches!(api, ApiError::AuthRequired));

        let api: ApiError = SpotifyError::Upstream { status: 429 }.into();
        assert!(matches!(api, ApiError::Upstream { status: 429 }));
    }
}
