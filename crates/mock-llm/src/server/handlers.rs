//! Route handlers: health, metrics, and one dispatch handler per provider.

use super::types::{build_response_with_headers, json_response, text_response};
use crate::metrics;
use crate::mock::{Conversation, DispatchOutcome, MockSet};
use crate::provider::Provider;
use bytes::Bytes;
use http_body_util::Full;
use hyper::{HeaderMap, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::{debug, info};

const SUPPORTED_ROUTES_HINT: &str = concat!(
    "Supported: /v1/chat/completions (OpenAI), /v1/messages (Anthropic), ",
    "/v1beta/models/{model}:generateContent (Google)"
);

/// GET /health
pub fn handle_health(mocks: &MockSet) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        &serde_json::json!({
            "status": "healthy",
            "service": "mock-llm",
            "openai": mocks.count(Provider::OpenAi),
            "anthropic": mocks.count(Provider::Anthropic),
            "google": mocks.count(Provider::Google),
        }),
    )
}

/// GET /metrics - Prometheus metrics
pub fn handle_metrics() -> Response<Full<Bytes>> {
    build_response_with_headers(
        StatusCode::OK,
        [("Content-Type", "text/plain; version=0.0.4")],
        metrics::collect_metrics(),
    )
}

/// POST /v1/chat/completions
pub fn handle_openai(body: &[u8], mocks: &MockSet) -> Response<Full<Bytes>> {
    match decode(Provider::OpenAi, body) {
        Ok(request) => dispatch(mocks, Conversation::OpenAi(request)),
        Err(response) => response,
    }
}

/// POST /v1/messages
///
/// Requires the `x-api-key` and `anthropic-version` headers like the real API.
pub fn handle_anthropic(
    headers: &HeaderMap,
    body: &[u8],
    mocks: &MockSet,
) -> Response<Full<Bytes>> {
    if !has_header(headers, "x-api-key") {
        metrics::record_request(Provider::Anthropic, "unauthorized");
        return text_response(StatusCode::UNAUTHORIZED, "Missing x-api-key header");
    }
    if !has_header(headers, "anthropic-version") {
        metrics::record_request(Provider::Anthropic, "invalid_request");
        return text_response(StatusCode::BAD_REQUEST, "Missing anthropic-version header");
    }

    match decode(Provider::Anthropic, body) {
        Ok(request) => dispatch(mocks, Conversation::Anthropic(request)),
        Err(response) => response,
    }
}

/// POST /v1beta/models/{model}:generateContent
pub fn handle_google(model: &str, body: &[u8], mocks: &MockSet) -> Response<Full<Bytes>> {
    debug!(model, "Google generateContent request");
    match decode(Provider::Google, body) {
        Ok(request) => dispatch(mocks, Conversation::Google(request)),
        Err(response) => response,
    }
}

/// Fallback for unknown paths
pub fn handle_not_found(method: &Method, path: &str) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::NOT_FOUND,
        &serde_json::json!({
            "error": "Endpoint not found",
            "path": path,
            "method": method.as_str(),
            "hint": SUPPORTED_ROUTES_HINT,
        }),
    )
}

/// Known path, wrong method
pub fn handle_method_not_allowed(allowed: &Method) -> Response<Full<Bytes>> {
    build_response_with_headers(
        StatusCode::METHOD_NOT_ALLOWED,
        [("Allow", allowed.as_str())],
        Bytes::new(),
    )
}

fn has_header(headers: &HeaderMap, name: &str) -> bool {
    headers.get(name).is_some_and(|v| !v.is_empty())
}

fn decode<R: DeserializeOwned>(
    provider: Provider,
    body: &[u8],
) -> Result<R, Response<Full<Bytes>>> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(provider = %provider, "Rejecting request body: {}", e);
        metrics::record_request(provider, "invalid_request");
        text_response(StatusCode::BAD_REQUEST, format!("Invalid JSON: {e}"))
    })
}

fn dispatch(mocks: &MockSet, conversation: Conversation) -> Response<Full<Bytes>> {
    let provider = conversation.provider();
    if is_streaming(&conversation) {
        debug!(provider = %provider, "Streaming requested; replying with a single JSON body");
    }

    let started = Instant::now();
    let outcome = mocks.match_request(&conversation);
    metrics::record_dispatch_duration(provider, started.elapsed().as_secs_f64());
    metrics::record_request(provider, outcome.label());

    match outcome {
        DispatchOutcome::Matched { index, entry } => {
            debug!(provider = %provider, index, name = %entry.name, "Serving mock response");
            json_response(StatusCode::OK, &entry.response)
        }
        DispatchOutcome::NotFound(reason) => {
            info!(provider = %provider, reason = reason.as_str(), "No matching mock found");
            text_response(StatusCode::NOT_FOUND, "No matching mock found")
        }
    }
}

fn is_streaming(conversation: &Conversation) -> bool {
    match conversation {
        Conversation::OpenAi(request) => request.stream.unwrap_or(false),
        Conversation::Anthropic(request) => request.stream.unwrap_or(false),
        Conversation::Google(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use hyper::header::HeaderValue;
    use serde_json::json;

    fn mocks() -> MockSet {
        let config: Config = serde_json::from_value(json!({
            "openai": [{
                "name": "hello",
                "match": {"match_type": "contains", "message": {"role": "user", "content": "hello"}},
                "response": {"id": "chatcmpl-1", "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hi!"}}]}
            }],
            "anthropic": [{
                "name": "hello",
                "match": {"match_type": "contains", "message": {"role": "user", "content": "hello"}},
                "response": {"id": "msg_1", "type": "message"}
            }]
        }))
        .unwrap();
        MockSet::from_config(&config)
    }

    fn anthropic_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("test-key"));
        headers.insert("anthropic-version", HeaderValue::from_static("2023-06-01"));
        headers
    }

    #[test]
    fn test_handle_health() {
        let resp = handle_health(&mocks());
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn test_handle_metrics() {
        let resp = handle_metrics();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn test_openai_match() {
        let body =
            br#"{"model": "gpt-4o", "messages": [{"role": "user", "content": "hello world"}]}"#;
        let resp = handle_openai(body, &mocks());
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_openai_no_match() {
        let body = br#"{"model": "gpt-4o", "messages": [{"role": "user", "content": "goodbye"}]}"#;
        let resp = handle_openai(body, &mocks());
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_openai_empty_conversation() {
        let resp = handle_openai(br#"{"model": "gpt-4o", "messages": []}"#, &mocks());
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_openai_invalid_json() {
        let resp = handle_openai(b"{not json", &mocks());
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = handle_openai(br#"{"messages": [{"content": "no role"}]}"#, &mocks());
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_anthropic_requires_headers() {
        let body = br#"{"messages": [{"role": "user", "content": "hello"}]}"#;

        let resp = handle_anthropic(&HeaderMap::new(), body, &mocks());
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let mut key_only = HeaderMap::new();
        key_only.insert("x-api-key", HeaderValue::from_static("test-key"));
        let resp = handle_anthropic(&key_only, body, &mocks());
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let mut empty_key = anthropic_headers();
        empty_key.insert("x-api-key", HeaderValue::from_static(""));
        let resp = handle_anthropic(&empty_key, body, &mocks());
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_anthropic_match() {
        let body = serde_json::to_vec(&json!({
            "model": "claude-sonnet-4-5",
            "max_tokens": 64,
            "stream": true,
            "messages": [{"role": "user", "content": "hello"}]
        }))
        .unwrap();
        let resp = handle_anthropic(&anthropic_headers(), &body, &mocks());
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn test_google_without_mocks() {
        let body = br#"{"contents": [{"role": "user", "parts": [{"text": "hello"}]}]}"#;
        let resp = handle_google("gemini-2.0-flash", body, &mocks());
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_not_found_and_method_not_allowed() {
        let resp = handle_not_found(&Method::GET, "/v2/unknown");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = handle_method_not_allowed(&Method::POST);
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers().get("Allow").unwrap(), "POST");
    }
}
