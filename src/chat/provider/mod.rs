//! Provider abstraction for the hosted chat model
//!
//! The session manager talks to `Provider`; `GeminiProvider` is the one
//! production implementation. Tests substitute a scripted provider.

mod gemini;

pub use gemini::GeminiProvider;

use async_trait::async_trait;
use serde::Serialize;

use super::session::Role;

/// One prior turn, as the provider sees it.
#[derive(Debug, Clone)]
pub struct HistoryMessage {
    pub role: Role,
    pub content: String,
}

/// A chat completion request: prior history plus the new input.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub history: Vec<HistoryMessage>,
    pub input: String,
}

/// Session-level generation settings, fixed at provider construction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub response_mime_type: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.5,
            top_p: 0.95,
            top_k: 64,
            max_output_tokens: 32_768,
            response_mime_type: "text/plain".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("model API responded with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("model request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model returned no candidates")]
    EmptyResponse,
}

/// Unified trait for hosted chat-model backends.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Send one turn and return the assistant's reply text.
    async fn send(&self, request: ChatRequest) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.temperature, 0.5);
        assert_eq!(config.top_p, 0.95);
        assert_eq!(config.top_k, 64);
        assert_eq!(config.max_output_tokens, 32_768);
        assert_eq!(config.response_mime_type, "text/plain");
    }

    #[test]
    fn test_generation_config_wire_names() {
        let json = serde_json::to_value(GenerationConfig::default()).unwrap();
        assert!(json.get("topP").is_some());
        assert!(json.get("topK").is_some());
        assert!(json.get("maxOutputTokens").is_some());
        assert!(json.get("responseMimeType").is_some());
    }
}
