//! Assistant service — catalog-aware chat over a single LLM call per prompt.
//!
//! DESIGN
//! ======
//! `send` appends the user's message to the transcript before the remote
//! call, renders the current catalog into the system instruction, makes
//! exactly one LLM call, and appends the assistant's reply. Failures never
//! reach the caller: they become a fixed error reply in the transcript.
//!
//! Only one exchange runs at a time. A `send` that arrives while another is
//! in flight is rejected as `Busy` without touching the transcript, so user
//! and assistant messages always land as adjacent pairs.

use std::fmt::Write;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::services::catalog::MockupRecord;
use crate::state::AppState;

pub const ERROR_REPLY: &str = "Error: Could not connect to AI assistant.";
pub const EMPTY_REPLY: &str = "I'm sorry, I couldn't process that request.";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl ChatMessage {
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into(), timestamp: OffsetDateTime::now_utc() }
    }
}

/// Append-only log of exchanged messages.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// What a `send` did to the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank prompt; nothing appended.
    Ignored,
    /// Another exchange is in flight; nothing appended.
    Busy,
    /// A user message and this assistant reply were appended.
    Replied(ChatMessage),
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Run one prompt/reply exchange against the current catalog.
pub async fn send(state: &AppState, prompt: &str) -> SendOutcome {
    if prompt.trim().is_empty() {
        return SendOutcome::Ignored;
    }

    let Ok(_slot) = state.assistant_gate.try_lock() else {
        info!(prompt_len = prompt.len(), "assistant: exchange already in flight, prompt rejected");
        return SendOutcome::Busy;
    };

    state
        .transcript
        .write()
        .await
        .push(ChatMessage::new(Role::User, prompt));

    let snapshot = state.catalog.read().await.records().to_vec();
    let system = build_system_prompt(&snapshot);
    info!(prompt_len = prompt.len(), records = snapshot.len(), "assistant: prompt received");

    let content = match &state.llm {
        None => {
            warn!("assistant: LLM not configured");
            ERROR_REPLY.to_string()
        }
        Some(llm) => match llm.chat(&system, prompt).await {
            Ok(response) => {
                info!(
                    model = %response.model,
                    finish_reason = response.finish_reason.as_deref().unwrap_or("-"),
                    input_tokens = response.input_tokens,
                    output_tokens = response.output_tokens,
                    has_text = response.text.is_some(),
                    "assistant: LLM response"
                );
                response.text.unwrap_or_else(|| EMPTY_REPLY.to_string())
            }
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "assistant: LLM call failed");
                ERROR_REPLY.to_string()
            }
        },
    };

    let reply = ChatMessage::new(Role::Assistant, content);
    let mut transcript = state.transcript.write().await;
    transcript.push(reply.clone());
    info!(messages = transcript.len(), "assistant: reply appended");
    SendOutcome::Replied(reply)
}

// =============================================================================
// SYSTEM PROMPT
// =============================================================================

pub(crate) fn build_system_prompt(records: &[MockupRecord]) -> String {
    let mut prompt = String::from(
        "You are the VDC (Virtual Design Center) Assistant.\n\
         Your job is to help developers navigate and understand the mockup index.\n\n\
         Current Mockups:\n",
    );

    if records.is_empty() {
        prompt.push_str("(no mockups registered yet)\n");
    } else {
        for record in records {
            let _ = writeln!(prompt, "- {} ({}): {}", record.title, record.status, record.description);
            let _ = writeln!(prompt, "  Author: {}, Version: {}", record.author, record.version);
            let _ = writeln!(prompt, "  Azure Task: {}", record.azure_url.as_deref().unwrap_or("No task linked"));
            let _ = writeln!(prompt, "  Documentation: {}", record.docs_url.as_deref().unwrap_or("No docs linked"));
        }
    }

    prompt.push_str(
        "\nRules:\n\
         1. Be concise and professional.\n\
         2. If asked about status, provide summaries.\n\
         3. If a user asks for documentation or a task link for a specific mockup, provide it.\n\
         4. If asked for a \"best starting point\", recommend the ones in 'In Development' or 'In Review'.\n",
    );
    prompt
}

#[cfg(test)]
#[path = "assistant_test.rs"]
mod tests;
