//! Per-provider mock registry and first-match dispatch.

use super::types::{DispatchOutcome, MockEntry, NotFoundReason};
use crate::config::MockConfig;
use crate::provider::ProviderAdapter;
use tracing::{debug, warn};

/// Ordered, immutable collection of mocks for one provider.
///
/// Built once from configuration. Registration order decides ties: the first
/// entry that matches wins.
#[derive(Debug)]
pub struct MockRegistry<A: ProviderAdapter> {
    adapter: A,
    entries: Vec<MockEntry>,
}

impl<A: ProviderAdapter> MockRegistry<A> {
    /// Normalize every configured mock through `adapter`.
    ///
    /// A mock whose match value does not fit the provider's message shape is
    /// kept in place (so indexes stay stable) but will never match.
    pub fn new(adapter: A, mocks: &[MockConfig]) -> Self {
        let entries = mocks
            .iter()
            .enumerate()
            .map(|(index, mock)| {
                let expected = match adapter.expected_value(&mock.matcher.message) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        warn!(
                            provider = %adapter.provider(),
                            index,
                            name = %mock.name,
                            "Mock will never match: {}",
                            e
                        );
                        None
                    }
                };
                MockEntry {
                    name: mock.name.clone(),
                    match_mode: mock.matcher.match_type,
                    expected,
                    response: mock.response.clone(),
                }
            })
            .collect();

        Self { adapter, entries }
    }

    pub fn entries(&self) -> &[MockEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries whose match value could not be normalized
    pub fn malformed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_malformed()).count()
    }

    /// Find the first entry matching the last message of `request`.
    pub fn dispatch(&self, request: &A::Request) -> DispatchOutcome<'_> {
        let provider = self.adapter.provider();

        let Some(tail) = self.adapter.tail_message(request) else {
            debug!(provider = %provider, "Empty conversation, nothing to match");
            return DispatchOutcome::NotFound(NotFoundReason::EmptyConversation);
        };

        for (index, entry) in self.entries.iter().enumerate() {
            if entry.is_malformed() {
                debug!(provider = %provider, index, name = %entry.name, "Skipping malformed mock");
                continue;
            }
            if entry.matches(&tail) {
                debug!(provider = %provider, index, name = %entry.name, "Mock matched");
                return DispatchOutcome::Matched { index, entry };
            }
        }

        debug!(provider = %provider, scanned = self.entries.len(), "No mock matched");
        DispatchOutcome::NotFound(NotFoundReason::NoMatch)
    }
}
