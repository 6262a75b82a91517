//! Route dispatch logic for the mock LLM server.

use super::handlers;
use super::types::text_response;
use crate::mock::MockSet;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::{HeaderMap, Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::debug;

/// Parsed route
#[derive(Debug, PartialEq, Eq)]
enum Route<'a> {
    /// GET /health
    Health,
    /// GET /metrics
    Metrics,
    /// POST /v1/chat/completions
    OpenAiChatCompletions,
    /// POST /v1/messages
    AnthropicMessages,
    /// POST /v1beta/models/:model:generateContent
    GoogleGenerateContent { model: &'a str },
}

impl<'a> Route<'a> {
    fn parse(path: &'a str) -> Option<Self> {
        match path {
            "/health" => return Some(Route::Health),
            "/metrics" => return Some(Route::Metrics),
            "/v1/chat/completions" => return Some(Route::OpenAiChatCompletions),
            "/v1/messages" => return Some(Route::AnthropicMessages),
            _ => {}
        }

        let model = path
            .strip_prefix("/v1beta/models/")?
            .strip_suffix(":generateContent")?;
        if model.is_empty() || model.contains('/') {
            return None;
        }
        Some(Route::GoogleGenerateContent { model })
    }

    fn method(&self) -> Method {
        match self {
            Route::Health | Route::Metrics => Method::GET,
            _ => Method::POST,
        }
    }
}

/// Main request router
pub async fn route_request(
    req: Request<Incoming>,
    mocks: Arc<MockSet>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let (parts, body) = req.into_parts();
    debug!("{} {}", parts.method, parts.uri.path());

    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            return Ok(text_response(
                StatusCode::BAD_REQUEST,
                format!("Failed to read request body: {e}"),
            ))
        }
    };

    Ok(route_by_path(
        &parts.method,
        parts.uri.path(),
        &parts.headers,
        &body,
        &mocks,
    ))
}

/// Route an already-buffered request
pub fn route_by_path(
    method: &Method,
    path: &str,
    headers: &HeaderMap,
    body: &[u8],
    mocks: &MockSet,
) -> Response<Full<Bytes>> {
    let Some(route) = Route::parse(path) else {
        return handlers::handle_not_found(method, path);
    };

    let allowed = route.method();
    if *method != allowed {
        return handlers::handle_method_not_allowed(&allowed);
    }

    match route {
        Route::Health => handlers::handle_health(mocks),
        Route::Metrics => handlers::handle_metrics(),
        Route::OpenAiChatCompletions => handlers::handle_openai(body, mocks),
        Route::AnthropicMessages => handlers::handle_anthropic(headers, body, mocks),
        Route::GoogleGenerateContent { model } => handlers::handle_google(model, body, mocks),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_route_parse() {
        assert_eq!(Route::parse("/health"), Some(Route::Health));
        assert_eq!(Route::parse("/metrics"), Some(Route::Metrics));
        assert_eq!(
            Route::parse("/v1/chat/completions"),
            Some(Route::OpenAiChatCompletions)
        );
        assert_eq!(Route::parse("/v1/messages"), Some(Route::AnthropicMessages));
        assert_eq!(
            Route::parse("/v1beta/models/gemini-2.0-flash:generateContent"),
            Some(Route::GoogleGenerateContent {
                model: "gemini-2.0-flash"
            })
        );

        // Invalid routes
        assert!(Route::parse("/").is_none());
        assert!(Route::parse("/v1beta/models/:generateContent").is_none());
        assert!(Route::parse("/v1beta/models/a/b:generateContent").is_none());
        assert!(Route::parse("/v1beta/models/gemini:streamGenerateContent").is_none());
        assert!(Route::parse("/v1/chat/completions/extra").is_none());
    }

    #[test]
    fn test_route_methods() {
        assert_eq!(Route::Health.method(), Method::GET);
        assert_eq!(Route::OpenAiChatCompletions.method(), Method::POST);
        assert_eq!(
            Route::GoogleGenerateContent { model: "m" }.method(),
            Method::POST
        );
    }

    #[test]
    fn test_route_by_path_status_codes() {
        let mocks = MockSet::from_config(&Config::default());
        let headers = HeaderMap::new();

        let resp = route_by_path(&Method::GET, "/health", &headers, b"", &mocks);
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = route_by_path(&Method::POST, "/health", &headers, b"", &mocks);
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

        let resp = route_by_path(&Method::GET, "/v1/chat/completions", &headers, b"", &mocks);
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

        let resp = route_by_path(&Method::GET, "/nope", &headers, b"", &mocks);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = br#"{"contents": [{"role": "user", "parts": [{"text": "hi"}]}]}"#;
        let resp = route_by_path(
            &Method::POST,
            "/v1beta/models/gemini-pro:generateContent",
            &headers,
            body,
            &mocks,
        );
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
