//! Gemini `generateContent` provider
//!
//! One non-streaming REST call per request. The model is asked for JSON
//! output, but the reply still goes through [`parse_sessions`] because
//! models do not always comply.

use crate::provider::config::ProviderConfig;
use crate::provider::parse::parse_sessions;
use crate::provider::prompts::build_prompt;
use crate::provider::{RecommendationProvider, RecommendationRequest};
use crate::session::SessionDescriptor;
use crate::{CalmcoreError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Longest error body kept in an error message
const MAX_ERROR_BODY: usize = 512;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Pull the generated text out of a response
fn response_text(response: GenerateContentResponse) -> Result<String> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(CalmcoreError::ProviderResponseError(format!(
            "model returned nothing: {}",
            reason
        )));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(CalmcoreError::ProviderResponseError(format!(
            "empty candidate (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(text)
}

fn truncate(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push('…');
    }
    body
}

/// Gemini REST provider
pub struct GeminiProvider {
    config: ProviderConfig,
    client: Client,
}

impl GeminiProvider {
    /// Create a provider; fails when the configuration has no credential
    pub fn from_config(config: ProviderConfig) -> Result<Self> {
        if !config.has_credential() {
            return Err(CalmcoreError::ConfigError(format!(
                "{} is not set",
                crate::provider::config::API_KEY_VAR
            )));
        }

        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Send `prompt` and return the generated text
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .config
            .api_key()
            .ok_or_else(|| CalmcoreError::ConfigError("credential missing".to_string()))?;

        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                response_mime_type: "application/json",
            },
        };

        debug!("POST {} ({} prompt chars)", self.endpoint(), prompt.len());

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CalmcoreError::ProviderTimeout {
                        elapsed_ms: self.config.request_timeout.as_millis() as u64,
                    }
                } else {
                    CalmcoreError::ProviderRequestError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CalmcoreError::ProviderRequestError(format!(
                "API error {}: {}",
                status,
                truncate(body)
            )));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            CalmcoreError::ProviderResponseError(format!("failed to decode response: {}", e))
        })?;

        response_text(parsed)
    }
}

#[async_trait]
impl RecommendationProvider for GeminiProvider {
    async fn recommend(&self, request: &RecommendationRequest) -> Result<Vec<SessionDescriptor>> {
        let text = self.generate(&build_prompt(request)).await?;
        parse_sessions(&text)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
