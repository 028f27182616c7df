//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! JSON endpoints for the catalog and the assistant under `/api`, plus a
//! liveness probe. Handlers are thin: they lock state, call a service, and
//! map the outcome to a status code.

pub mod assistant;
pub mod mockups;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, patch};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/mockups", get(mockups::list_mockups).post(mockups::create_mockup))
        .route("/api/mockups/stats", get(mockups::status_stats))
        .route("/api/mockups/{id}", get(mockups::get_mockup))
        .route("/api/mockups/{id}/status", patch(mockups::change_status))
        .route(
            "/api/assistant/messages",
            get(assistant::list_messages).post(assistant::send_prompt),
        )
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
