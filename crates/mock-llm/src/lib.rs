//! In-process test double for the OpenAI, Anthropic, and Google generative
//! language APIs.
//!
//! Mocks are matched against the last message of an incoming conversation,
//! in registration order, and the first hit's canned response is returned
//! verbatim.

pub mod config;
pub mod metrics;
pub mod mock;
pub mod predicate;
pub mod provider;
pub mod server;

pub use config::{Config, ConfigError, MatchSpec, MockConfig};
pub use mock::{Conversation, DispatchOutcome, MockRegistry, MockSet};
pub use predicate::MatchMode;
pub use provider::{Provider, ProviderAdapter};
pub use server::{MockLlmServer, ServerError};
