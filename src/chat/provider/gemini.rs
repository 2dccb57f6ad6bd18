//! Gemini provider for the Melody chat
//!
//! Uses the generateContent API. History is replayed on every call; the
//! system prompt travels as the first user content, so no separate
//! systemInstruction is sent.

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{ChatRequest, GenerationConfig, Provider, ProviderError};
use crate::chat::session::Role;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Gemini chat provider.
pub struct GeminiProvider {
    client: HttpClient,
    api_key: String,
    model: String,
    base_url: String,
    generation_config: GenerationConfig,
    timeout: Duration,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: String, generation_config: GenerationConfig) -> Self {
        Self {
            client: HttpClient::new(),
            api_key,
            model,
            base_url: GEMINI_BASE_URL.to_string(),
            generation_config,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Point the provider at a different endpoint (local test doubles).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build Gemini contents from the request.
    ///
    /// Gemini only knows "user" and "model" roles; system turns are replayed
    /// as user content, matching how the persona prompt was delivered in the
    /// first place. Failed turns never reach the model.
    fn build_contents(request: &ChatRequest) -> Vec<GeminiContent> {
        let mut contents = Vec::new();

        for msg in &request.history {
            let role = match msg.role {
                Role::User | Role::System => "user",
                Role::Assistant => "model",
            };
            contents.push(GeminiContent {
                role: role.to_string(),
                parts: vec![GeminiPart { text: msg.content.clone() }],
            });
        }

        contents.push(GeminiContent {
            role: "user".to_string(),
            parts: vec![GeminiPart { text: request.input.clone() }],
        });

        contents
    }

    /// Extract the reply text from a response.
    fn parse_response(response: GeminiResponse) -> Result<String, ProviderError> {
        if let Some(usage) = &response.usage_metadata {
            debug!(
                input_tokens = usage.prompt_token_count.unwrap_or(0),
                output_tokens = usage.candidates_token_count.unwrap_or(0),
                "gemini usage"
            );
        }

        let text: String = response
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn send(&self, request: ChatRequest) -> Result<String, ProviderError> {
        let api_request = GeminiRequest {
            contents: Self::build_contents(&request),
            generation_config: self.generation_config.clone(),
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&api_request)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, message });
        }

        let api_response: GeminiResponse = response.json().await?;

        if let Some(error) = api_response.error {
            return Err(ProviderError::Api {
                status: error.code.unwrap_or(0),
                message: error.message,
            });
        }

        Self::parse_response(api_response)
    }
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Clone)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Clone)]
struct GeminiPart {
    text: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<GeminiUsage>,
    error: Option<GeminiError>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiContentResponse,
}

#[derive(Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiUsage {
    #[serde(rename = "promptTokenCount")]
    prompt_token_count: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    candidates_token_count: Option<u32>,
}

#[derive(Deserialize)]
struct GeminiError {
    code: Option<u16>,
    message: String,
}
