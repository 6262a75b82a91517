//! Anthropic Messages request shapes.

use super::{Provider, ProviderAdapter};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /v1/messages`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagesRequest {
    #[serde(default)]
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub messages: Vec<AnthropicMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<Value>,
    /// Accepted but ignored: responses are never streamed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnthropicRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnthropicMessage {
    pub role: AnthropicRole,
    pub content: AnthropicContent,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Message content. A plain string is shorthand for a single text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnthropicContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl AnthropicContent {
    /// Expand the string shorthand into its block form.
    pub fn into_blocks(self) -> Vec<ContentBlock> {
        match self {
            AnthropicContent::Text(text) => vec![ContentBlock::text(text)],
            AnthropicContent::Blocks(blocks) => blocks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: Some(text.into()),
            extra: Map::new(),
        }
    }
}

/// Adapter for the Anthropic Messages API
#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicAdapter;

impl ProviderAdapter for AnthropicAdapter {
    type Request = MessagesRequest;
    type Message = AnthropicMessage;

    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    fn messages<'r>(&self, request: &'r MessagesRequest) -> &'r [AnthropicMessage] {
        &request.messages
    }

    fn normalize(&self, message: &AnthropicMessage) -> Result<Value, serde_json::Error> {
        let mut message = message.clone();
        message.content = AnthropicContent::Blocks(message.content.into_blocks());
        serde_json::to_value(message)
    }
}
