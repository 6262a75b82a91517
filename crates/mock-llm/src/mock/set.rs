//! The full mock set: one registry per provider.

use super::registry::MockRegistry;
use super::types::DispatchOutcome;
use crate::config::Config;
use crate::provider::{
    AnthropicAdapter, ChatCompletionRequest, GenerateContentRequest, GoogleAdapter,
    MessagesRequest, OpenAiAdapter, Provider,
};

/// A decoded inbound request, tagged by provider
#[derive(Debug, Clone)]
pub enum Conversation {
    OpenAi(ChatCompletionRequest),
    Anthropic(MessagesRequest),
    Google(GenerateContentRequest),
}

impl Conversation {
    pub fn provider(&self) -> Provider {
        match self {
            Conversation::OpenAi(_) => Provider::OpenAi,
            Conversation::Anthropic(_) => Provider::Anthropic,
            Conversation::Google(_) => Provider::Google,
        }
    }
}

/// Registries for every provider. Read-only after construction and safe to
/// share between request handlers without locking.
#[derive(Debug)]
pub struct MockSet {
    openai: MockRegistry<OpenAiAdapter>,
    anthropic: MockRegistry<AnthropicAdapter>,
    google: MockRegistry<GoogleAdapter>,
}

impl MockSet {
    pub fn from_config(config: &Config) -> Self {
        Self {
            openai: MockRegistry::new(OpenAiAdapter, &config.openai),
            anthropic: MockRegistry::new(AnthropicAdapter, &config.anthropic),
            google: MockRegistry::new(GoogleAdapter, &config.google),
        }
    }

    pub fn openai(&self) -> &MockRegistry<OpenAiAdapter> {
        &self.openai
    }

    pub fn anthropic(&self) -> &MockRegistry<AnthropicAdapter> {
        &self.anthropic
    }

    pub fn google(&self) -> &MockRegistry<GoogleAdapter> {
        &self.google
    }

    /// Number of mocks registered for a provider
    pub fn count(&self, provider: Provider) -> usize {
        match provider {
            Provider::OpenAi => self.openai.len(),
            Provider::Anthropic => self.anthropic.len(),
            Provider::Google => self.google.len(),
        }
    }

    /// Number of mocks registered for a provider that can never match
    pub fn malformed_count(&self, provider: Provider) -> usize {
        match provider {
            Provider::OpenAi => self.openai.malformed_count(),
            Provider::Anthropic => self.anthropic.malformed_count(),
            Provider::Google => self.google.malformed_count(),
        }
    }

    /// Dispatch a request to its provider's registry.
    pub fn match_request(&self, conversation: &Conversation) -> DispatchOutcome<'_> {
        match conversation {
            Conversation::OpenAi(request) => self.openai.dispatch(request),
            Conversation::Anthropic(request) => self.anthropic.dispatch(request),
            Conversation::Google(request) => self.google.dispatch(request),
        }
    }
}
