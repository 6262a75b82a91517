//! Mock entry configuration.

use crate::predicate::MatchMode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One configured mock: a match specification and the canned response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MockConfig {
    /// Identifier for this mock (diagnostics only, never used for lookup)
    #[serde(default)]
    pub name: String,
    #[serde(rename = "match")]
    pub matcher: MatchSpec,
    /// Returned verbatim as the response body
    pub response: Value,
}

/// Match type and the vendor-shaped message to compare with the last turn.
///
/// OpenAI and Anthropic mocks name the message `message`; Google mocks name it
/// `content`. Both keys are accepted for every vendor.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchSpec {
    pub match_type: MatchMode,
    #[serde(alias = "content")]
    pub message: Value,
}

impl MockConfig {
    pub fn new(
        name: impl Into<String>,
        match_type: MatchMode,
        message: Value,
        response: Value,
    ) -> Self {
        Self {
            name: name.into(),
            matcher: MatchSpec {
                match_type,
                message,
            },
            response,
        }
    }
}
