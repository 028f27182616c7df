//! LLM — text-generation adapter for the catalog assistant.
//!
//! DESIGN
//! ======
//! Configured from environment variables. `LlmClient` owns the provider
//! client plus the model name and implements `LlmChat`, which is the seam
//! the assistant service depends on (and tests mock).

pub mod config;
pub mod gemini;
pub mod types;

use config::{LlmConfig, LlmProviderKind};
pub use types::LlmChat;
use types::{ChatResponse, LlmError};

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete LLM client. Configured by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: LlmProvider,
    model: String,
}

enum LlmProvider {
    Gemini(gemini::GeminiClient),
}

impl LlmClient {
    /// Build an LLM client from environment variables. See [`LlmConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(&config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let inner = match config.provider {
            LlmProviderKind::Gemini => LlmProvider::Gemini(gemini::GeminiClient::new(config)?),
        };
        Ok(Self { inner, model: config.model.clone() })
    }

    /// Return the configured model name (e.g. `"gemini-3-flash-preview"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(&self, system: &str, prompt: &str) -> Result<ChatResponse, LlmError> {
        match &self.inner {
            LlmProvider::Gemini(c) => c.chat(&self.model, system, prompt).await,
        }
    }
}
