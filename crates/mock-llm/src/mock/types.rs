//! Type definitions for registered mocks and dispatch outcomes.

use crate::predicate::{matches, MatchMode};
use serde_json::Value;

/// A registered mock, normalized for matching.
#[derive(Debug, Clone)]
pub struct MockEntry {
    /// Diagnostic label; not used for lookup
    pub name: String,
    pub match_mode: MatchMode,
    /// Canonical expected value, `None` when the configured match value was
    /// malformed for its provider
    pub expected: Option<Value>,
    /// Returned verbatim, never inspected
    pub response: Value,
}

impl MockEntry {
    /// Whether the configured match value failed to normalize
    pub fn is_malformed(&self) -> bool {
        self.expected.is_none()
    }

    /// Test this entry against a canonical tail message. Malformed entries never match.
    pub fn matches(&self, tail: &Value) -> bool {
        self.expected
            .as_ref()
            .is_some_and(|expected| matches(self.match_mode, expected, tail))
    }
}

/// Why dispatch produced no response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The request carried no messages
    EmptyConversation,
    /// Every entry was scanned and none matched
    NoMatch,
}

impl NotFoundReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotFoundReason::EmptyConversation => "empty_conversation",
            NotFoundReason::NoMatch => "no_match",
        }
    }
}

/// Result of dispatching one request against a registry
#[derive(Debug, Clone, Copy)]
pub enum DispatchOutcome<'a> {
    Matched {
        /// Registration index of the winning entry
        index: usize,
        entry: &'a MockEntry,
    },
    NotFound(NotFoundReason),
}

impl<'a> DispatchOutcome<'a> {
    pub fn is_match(&self) -> bool {
        matches!(self, DispatchOutcome::Matched { .. })
    }

    /// The canned response, if an entry matched
    pub fn response(&self) -> Option<&'a Value> {
        match self {
            DispatchOutcome::Matched { entry, .. } => Some(&entry.response),
            DispatchOutcome::NotFound(_) => None,
        }
    }

    /// Registration index of the matching entry
    pub fn index(&self) -> Option<usize> {
        match self {
            DispatchOutcome::Matched { index, .. } => Some(*index),
            DispatchOutcome::NotFound(_) => None,
        }
    }

    /// Label used for logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            DispatchOutcome::Matched { .. } => "matched",
            DispatchOutcome::NotFound(reason) => reason.as_str(),
        }
    }
}
