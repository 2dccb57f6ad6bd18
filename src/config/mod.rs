// src/config/mod.rs
// All tunables come from the environment; the four secrets are required
// and startup fails without them.

use anyhow::{Context, Result};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct MoodifyConfig {
    // ── Spotify OAuth
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub spotify_redirect_uri: String,
    pub spotify_auth_base_url: String,
    pub spotify_api_base_url: String,
    pub spotify_scopes: String,

    // ── Gemini
    pub gemini_api_key: String,
    pub gemini_model: String,

    // ── Outbound HTTP
    pub request_timeout_secs: u64,

    // ── Server
    pub host: String,
    pub port: u16,
    pub cors_origin: String,

    // ── Debugging
    /// Log the raw access token at debug level after an exchange. Off by
    /// default; tokens never appear in Debug impls regardless.
    pub debug_log_token: bool,
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("required environment variable {} is not set", key))
}

fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => val.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

impl MoodifyConfig {
    /// Load configuration from the environment. Call `dotenvy::dotenv()`
    /// first if a `.env` file should be honored.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            spotify_client_id: require_env("SPOTIFY_CLIENT_ID")?,
            spotify_client_secret: require_env("SPOTIFY_CLIENT_SECRET")?,
            spotify_redirect_uri: require_env("SPOTIFY_REDIRECT_URI")?,
            spotify_auth_base_url: env_var_or(
                "SPOTIFY_AUTH_BASE_URL",
                "https://accounts.spotify.com".to_string(),
            ),
            spotify_api_base_url: env_var_or(
                "SPOTIFY_API_BASE_URL",
                "https://api.spotify.com".to_string(),
            ),
            spotify_scopes: env_var_or(
                "SPOTIFY_SCOPES",
                "user-top-read user-read-private playlist-read-private".to_string(),
            ),
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_model: env_var_or("GEMINI_MODEL", "gemini-1.5-flash".to_string()),
            request_timeout_secs: env_var_or("MOODIFY_REQUEST_TIMEOUT_SECS", 5),
            host: env_var_or("MOODIFY_HOST", "127.0.0.1".to_string()),
            port: env_var_or("MOODIFY_PORT", 8888),
            cors_origin: env_var_or("MOODIFY_CORS_ORIGIN", "http://localhost:3000".to_string()),
            debug_log_token: env_var_or("MOODIFY_DEBUG_LOG_TOKEN", false),
        })
    }

    /// Server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
