//! Gemini `generateContent` client.
//!
//! Thin HTTP wrapper for `/models/{model}:generateContent`. Pure parsing in
//! `parse_response` for testability.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::config::LlmConfig;
use super::types::{ChatResponse, LlmError};

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key_env: String,
    temperature: f32,
}

impl GeminiClient {
    /// Build a client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns `HttpClientBuild` if the reqwest client cannot be constructed.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key_env: config.api_key_env.clone(),
            temperature: config.temperature,
        })
    }

    /// Generate a reply to `prompt` under the `system` instruction.
    ///
    /// The API key is read from the environment on every call. A missing key
    /// is sent as an empty string and left for the provider to reject.
    ///
    /// # Errors
    ///
    /// Returns `ApiRequest` on transport failure, `ApiResponse` on a non-2xx
    /// status, and `ApiParse` when the body is not a Gemini response.
    pub async fn chat(&self, model: &str, system: &str, prompt: &str) -> Result<ChatResponse, LlmError> {
        let api_key = std::env::var(&self.api_key_env).unwrap_or_default();
        let body = build_request(system, prompt, self.temperature);
        let url = endpoint_url(&self.base_url, model);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        if !status.is_success() {
            return Err(LlmError::ApiResponse { status: status.as_u16(), body: text });
        }

        parse_response(&text, model)
    }
}

pub(crate) fn endpoint_url(base_url: &str, model: &str) -> String {
    format!("{}/models/{model}:generateContent", base_url.trim_end_matches('/'))
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiRequest<'a> {
    contents: Vec<ApiContent<'a>>,
    system_instruction: ApiContent<'a>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct ApiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<ApiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct ApiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

pub(crate) fn build_request<'a>(system: &'a str, prompt: &'a str, temperature: f32) -> ApiRequest<'a> {
    ApiRequest {
        contents: vec![ApiContent { role: Some("user"), parts: vec![ApiPart { text: prompt }] }],
        system_instruction: ApiContent { role: None, parts: vec![ApiPart { text: system }] },
        generation_config: GenerationConfig { temperature },
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
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
    /// Thought summaries are returned as text parts flagged `thought: true`.
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

// =============================================================================
// PARSING
// =============================================================================

pub(crate) fn parse_response(json: &str, requested_model: &str) -> Result<ChatResponse, LlmError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let first = api.candidates.into_iter().next();
    let finish_reason = first.as_ref().and_then(|c| c.finish_reason.clone());
    let text: String = first
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter(|p| !p.thought)
                .filter_map(|p| p.text)
                .collect()
        })
        .unwrap_or_default();

    let usage = api.usage_metadata;
    Ok(ChatResponse {
        text: if text.is_empty() { None } else { Some(text) },
        model: api.model_version.unwrap_or_else(|| requested_model.to_string()),
        finish_reason,
        input_tokens: usage.as_ref().map_or(0, |u| u.prompt_token_count),
        output_tokens: usage.as_ref().map_or(0, |u| u.candidates_token_count),
    })
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
