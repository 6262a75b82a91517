//! Provider adapters: translation from vendor-shaped payloads to value trees.
//!
//! Each supported vendor gets one adapter. An adapter knows where the
//! conversation lives in that vendor's request body and how a single message
//! is shaped. It makes no matching decisions; those live in
//! [`crate::predicate`].
//!
//! Expected values (from configuration) and actual messages (from requests)
//! are normalized through the same vendor message type, so optional fields that
//! are omitted on one side and `null` on the other compare equal.
//!
//! ## Module Structure
//!
//! - `openai`: Chat Completions (`/v1/chat/completions`)
//! - `anthropic`: Messages (`/v1/messages`)
//! - `google`: Gemini generateContent (`/v1beta/models/{model}:generateContent`)

mod anthropic;
mod google;
mod openai;

pub use anthropic::{
    AnthropicAdapter, AnthropicContent, AnthropicMessage, AnthropicRole, ContentBlock,
    MessagesRequest,
};
pub use google::{Content, GenerateContentRequest, GoogleAdapter, Part};
pub use openai::{
    ChatCompletionRequest, ChatContent, ChatMessage, ChatRole, ContentPart, OpenAiAdapter,
};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Supported LLM vendors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Anthropic,
    Google,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::OpenAi, Provider::Anthropic, Provider::Google];

    /// Name used in configuration keys, logs and metric labels
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Google => "google",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while translating a configured match payload
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("malformed {provider} match value: {source}")]
    MalformedMatchValue {
        provider: Provider,
        #[source]
        source: serde_json::Error,
    },
}

/// Vendor-specific view of a conversation request and its messages.
pub trait ProviderAdapter: Send + Sync + 'static {
    /// Decoded request body
    type Request: DeserializeOwned + Send + Sync;
    /// A single conversation turn
    type Message: Serialize + DeserializeOwned;

    fn provider(&self) -> Provider;

    /// The conversation turns of a request, oldest first.
    fn messages<'r>(&self, request: &'r Self::Request) -> &'r [Self::Message];

    /// Convert one message into its canonical value tree.
    fn normalize(&self, message: &Self::Message) -> Result<Value, serde_json::Error> {
        serde_json::to_value(message)
    }

    /// Canonical value of the last turn, or `None` for an empty conversation.
    fn tail_message(&self, request: &Self::Request) -> Option<Value> {
        let last = self.messages(request).last()?;
        self.normalize(last).ok()
    }

    /// Canonical value of a match payload stored in configuration.
    fn expected_value(&self, raw: &Value) -> Result<Value, AdapterError> {
        let malformed = |source| AdapterError::MalformedMatchValue {
            provider: self.provider(),
            source,
        };
        let message: Self::Message = serde_json::from_value(raw.clone()).map_err(malformed)?;
        self.normalize(&message).map_err(malformed)
    }
}
