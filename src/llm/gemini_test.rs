use super::*;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use std::sync::{Arc, Mutex};

fn make_response(parts: serde_json::Value) -> String {
    serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": parts },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": { "promptTokenCount": 120, "candidatesTokenCount": 30, "totalTokenCount": 150 },
        "modelVersion": "gemini-3-flash-preview"
    })
    .to_string()
}

// =============================================================================
// parse_response
// =============================================================================

#[test]
fn parse_text_response() {
    let json = make_response(serde_json::json!([{ "text": "Two projects are in review." }]));
    let resp = parse_response(&json, "fallback-model").unwrap();
    assert_eq!(resp.text.as_deref(), Some("Two projects are in review."));
    assert_eq!(resp.model, "gemini-3-flash-preview");
    assert_eq!(resp.finish_reason.as_deref(), Some("STOP"));
    assert_eq!(resp.input_tokens, 120);
    assert_eq!(resp.output_tokens, 30);
}

#[test]
fn parse_joins_multiple_text_parts() {
    let json = make_response(serde_json::json!([{ "text": "Start with " }, { "text": "Spatial Explorer v2." }]));
    let resp = parse_response(&json, "m").unwrap();
    assert_eq!(resp.text.as_deref(), Some("Start with Spatial Explorer v2."));
}

#[test]
fn parse_skips_thought_parts() {
    let json = make_response(serde_json::json!([
        { "text": "Let me look at the catalog...", "thought": true },
        { "text": "The dashboard is in development." }
    ]));
    let resp = parse_response(&json, "m").unwrap();
    assert_eq!(resp.text.as_deref(), Some("The dashboard is in development."));
}

#[test]
fn parse_no_candidates_has_no_text() {
    let json = serde_json::json!({
        "promptFeedback": { "blockReason": "SAFETY" }
    })
    .to_string();
    let resp = parse_response(&json, "gemini-3-flash-preview").unwrap();
    assert!(resp.text.is_none());
    assert!(resp.finish_reason.is_none());
    assert_eq!(resp.model, "gemini-3-flash-preview");
    assert_eq!(resp.input_tokens, 0);
}

#[test]
fn parse_whitespace_only_text_is_kept() {
    let json = make_response(serde_json::json!([{ "text": "  \n" }]));
    let resp = parse_response(&json, "m").unwrap();
    assert_eq!(resp.text.as_deref(), Some("  \n"));
}

#[test]
fn parse_empty_text_is_none() {
    let json = make_response(serde_json::json!([{ "text": "" }]));
    let resp = parse_response(&json, "m").unwrap();
    assert!(resp.text.is_none());
}

#[test]
fn parse_candidate_without_content() {
    let json = serde_json::json!({ "candidates": [{ "finishReason": "MAX_TOKENS" }] }).to_string();
    let resp = parse_response(&json, "m").unwrap();
    assert!(resp.text.is_none());
    assert_eq!(resp.finish_reason.as_deref(), Some("MAX_TOKENS"));
}

#[test]
fn parse_invalid_json() {
    let result = parse_response("not json", "m");
    assert!(matches!(result.unwrap_err(), LlmError::ApiParse(_)));
}

// =============================================================================
// build_request
// =============================================================================

#[test]
fn request_body_matches_generate_content_shape() {
    let body = serde_json::to_value(build_request("You are the assistant.", "status?", 0.7)).unwrap();
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "status?");
    assert_eq!(body["systemInstruction"]["parts"][0]["text"], "You are the assistant.");
    assert!(body["systemInstruction"].get("role").is_none());
    let temperature = body["generationConfig"]["temperature"].as_f64().unwrap();
    assert!((temperature - 0.7).abs() < 1e-6);
}

#[test]
fn endpoint_url_includes_model() {
    assert_eq!(
        endpoint_url("https://generativelanguage.googleapis.com/v1beta/", "gemini-3-flash-preview"),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
    );
}

#[test]
fn new_client_builds_from_default_config() {
    assert!(GeminiClient::new(&LlmConfig::default()).is_ok());
}

// =============================================================================
// chat (over HTTP)
// =============================================================================

/// Env var that no test sets, so the key is always missing.
const UNSET_KEY_ENV: &str = "MOCKUP_INDEX_GEMINI_TEST_UNSET_KEY";
/// Env var only `chat_success_returns_candidate_text` sets.
const SET_KEY_ENV: &str = "MOCKUP_INDEX_GEMINI_TEST_KEY";

/// One request the stub upstream received: path target, key header, JSON body.
type SeenRequest = (String, Option<String>, serde_json::Value);

#[derive(Clone, Default)]
struct Upstream {
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl Upstream {
    fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

/// Rejects an empty key with 401, answers anything else with one candidate.
async fn generate_content(
    State(upstream): State<Upstream>,
    Path(target): Path<String>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let key = headers
        .get("x-goog-api-key")
        .map(|v| v.to_str().unwrap().to_string());
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    upstream.seen.lock().unwrap().push((target, key.clone(), body));

    if key.as_deref().unwrap_or_default().is_empty() {
        let error = serde_json::json!({ "error": { "code": 401, "status": "UNAUTHENTICATED" } });
        return (StatusCode::UNAUTHORIZED, error.to_string());
    }
    (StatusCode::OK, make_response(serde_json::json!([{ "text": "Two projects are in review." }])))
}

/// Serve the stub upstream on an ephemeral port and return its base URL.
async fn spawn_upstream() -> (String, Upstream) {
    let upstream = Upstream::default();
    let router = axum::Router::new()
        .route("/v1beta/models/{target}", axum::routing::post(generate_content))
        .with_state(upstream.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{addr}/v1beta"), upstream)
}

fn stub_config(base_url: String, api_key_env: &str) -> LlmConfig {
    LlmConfig { base_url, api_key_env: api_key_env.to_string(), ..LlmConfig::default() }
}

#[tokio::test]
async fn chat_missing_key_is_sent_empty_and_401_is_api_response() {
    let (base_url, upstream) = spawn_upstream().await;
    let client = GeminiClient::new(&stub_config(base_url, UNSET_KEY_ENV)).unwrap();

    let err = client.chat("gemini-test", "SYS", "status?").await.unwrap_err();

    assert!(matches!(err, LlmError::ApiResponse { status: 401, ref body } if body.contains("UNAUTHENTICATED")));
    let seen = upstream.seen();
    assert_eq!(seen.len(), 1);
    let (target, key, body) = &seen[0];
    assert_eq!(target, "gemini-test:generateContent");
    assert_eq!(key.as_deref(), Some(""));
    assert_eq!(
        *body,
        serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": "status?" }] }],
            "systemInstruction": { "parts": [{ "text": "SYS" }] },
            "generationConfig": { "temperature": 0.7 }
        })
    );
}

#[tokio::test]
async fn chat_success_returns_candidate_text() {
    // SAFETY: no other test reads or writes this variable.
    unsafe { std::env::set_var(SET_KEY_ENV, "test-key") };
    let (base_url, upstream) = spawn_upstream().await;
    let client = GeminiClient::new(&stub_config(base_url, SET_KEY_ENV)).unwrap();

    let resp = client.chat("gemini-test", "SYS", "status?").await.unwrap();

    assert_eq!(resp.text.as_deref(), Some("Two projects are in review."));
    assert_eq!(resp.model, "gemini-3-flash-preview");
    assert_eq!(resp.input_tokens, 120);
    assert_eq!(upstream.seen()[0].1.as_deref(), Some("test-key"));
}

#[tokio::test]
async fn chat_unreachable_upstream_is_api_request() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = GeminiClient::new(&stub_config(format!("http://{addr}/v1beta"), UNSET_KEY_ENV)).unwrap();

    let err = client.chat("gemini-test", "SYS", "status?").await.unwrap_err();
    assert!(matches!(err, LlmError::ApiRequest(_)));
}
