//! Mock registration and dispatch.
//!
//! This module provides:
//! - `MockRegistry`: ordered mocks for one provider, with first-match dispatch
//! - `MockSet`: the three provider registries built from a `Config`
//! - `DispatchOutcome`: the matched entry, or why nothing matched
//!
//! Registries are immutable once built. Dispatch only reads them, so any
//! number of request handlers can share one `Arc<MockSet>`.
//!
//! ## Module Structure
//!
//! - `types`: entries and outcomes
//! - `registry`: `MockRegistry` and the dispatch scan
//! - `set`: `MockSet` and the provider-tagged `Conversation`

mod registry;
mod set;
mod types;


pub use registry::MockRegistry;
pub use set::{Conversation, MockSet};
pub use types::{DispatchOutcome, MockEntry, NotFoundReason};
