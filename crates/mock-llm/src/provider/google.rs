//! Google Gemini generateContent request shapes.

use super::{Provider, ProviderAdapter};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /v1beta/models/{model}:generateContent`
///
/// The model is part of the path, not the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    #[serde(default)]
    pub contents: Vec<Content>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One conversation turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// inlineData, functionCall, functionResponse, ...
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Adapter for the Gemini generateContent API
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleAdapter;

impl ProviderAdapter for GoogleAdapter {
    type Request = GenerateContentRequest;
    type Message = Content;

    fn provider(&self) -> Provider {
        Provider::Google
    }

    fn messages<'r>(&self, request: &'r GenerateContentRequest) -> &'r [Content] {
        &request.contents
    }
}
