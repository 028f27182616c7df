use super::*;

// =============================================================================
// LlmError::error_code
// =============================================================================

#[test]
fn error_code_config_parse() {
    let err = LlmError::ConfigParse("bad".into());
    assert_eq!(err.error_code(), "E_CONFIG_PARSE");
}

#[test]
fn error_code_api_request() {
    let err = LlmError::ApiRequest("timeout".into());
    assert_eq!(err.error_code(), "E_API_REQUEST");
}

#[test]
fn error_code_api_response() {
    let err = LlmError::ApiResponse { status: 403, body: "denied".into() };
    assert_eq!(err.error_code(), "E_API_RESPONSE");
}

#[test]
fn error_code_api_parse() {
    let err = LlmError::ApiParse("json".into());
    assert_eq!(err.error_code(), "E_API_PARSE");
}

#[test]
fn error_code_http_client_build() {
    let err = LlmError::HttpClientBuild("tls".into());
    assert_eq!(err.error_code(), "E_HTTP_CLIENT_BUILD");
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn api_response_display_hides_body() {
    let err = LlmError::ApiResponse { status: 401, body: "API key not valid".into() };
    assert_eq!(err.to_string(), "API response error: status 401");
}

#[test]
fn chat_response_default_has_no_text() {
    let resp = ChatResponse::default();
    assert!(resp.text.is_none());
    assert_eq!(resp.input_tokens, 0);
}
