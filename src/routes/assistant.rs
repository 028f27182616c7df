//! Assistant routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use tracing::error;

use crate::services::assistant::{self, ChatMessage, SendOutcome};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PromptBody {
    pub prompt: String,
}

/// `GET /api/assistant/messages` — full transcript, oldest first.
pub async fn list_messages(State(state): State<AppState>) -> Json<Vec<ChatMessage>> {
    Json(state.transcript.read().await.messages().to_vec())
}

/// `POST /api/assistant/messages` — send a prompt and return the reply.
///
/// 204 for a blank prompt, 409 while another exchange is in flight.
pub async fn send_prompt(State(state): State<AppState>, Json(body): Json<PromptBody>) -> Result<Response, StatusCode> {
    // Run detached so a dropped connection cannot leave a user message without its reply.
    let outcome = tokio::spawn(async move { assistant::send(&state, &body.prompt).await })
        .await
        .map_err(|e| {
            error!(error = %e, "assistant: send task failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(match outcome {
        SendOutcome::Replied(reply) => Json(reply).into_response(),
        SendOutcome::Ignored => StatusCode::NO_CONTENT.into_response(),
        SendOutcome::Busy => StatusCode::CONFLICT.into_response(),
    })
}
