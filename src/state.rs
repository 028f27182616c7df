//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It owns the catalog and the assistant transcript, each behind its own
//! lock, plus the optional LLM client and the single-slot gate that keeps
//! assistant exchanges from overlapping. Locks are held only for in-memory
//! mutation, never across the outbound LLM call.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::llm::LlmChat;
use crate::services::assistant::Transcript;
use crate::services::catalog::Catalog;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RwLock<Catalog>>,
    pub transcript: Arc<RwLock<Transcript>>,
    /// Optional LLM client. `None` if LLM config is invalid.
    pub llm: Option<Arc<dyn LlmChat>>,
    /// Held for the duration of one assistant exchange.
    pub assistant_gate: Arc<Mutex<()>>,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: Catalog, llm: Option<Arc<dyn LlmChat>>) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            transcript: Arc::new(RwLock::new(Transcript::new())),
            llm,
            assistant_gate: Arc::new(Mutex::new(())),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
