//! HTTP front end for the mock registries.
//!
//! One listener serves all three provider APIs:
//!
//! - `POST /v1/chat/completions` (OpenAI)
//! - `POST /v1/messages` (Anthropic)
//! - `POST /v1beta/models/{model}:generateContent` (Google)
//!
//! plus `GET /health` and `GET /metrics`.

mod core;
mod handlers;
mod retry;
mod router;
mod types;

pub use core::{MockLlmServer, ServerError};
pub use retry::retry_with_backoff;
pub use router::{route_by_path, route_request};
