//! Structural matcher for mock selection.
//!
//! Every provider normalizes both sides of a comparison into a
//! `serde_json::Value` tree and compares them here, so the matching rules are
//! implemented and tested once.
//!
//! # Module Structure
//!
//! - `mode` - `MatchMode` (exact or contains)
//! - `structural` - recursive comparison of value trees

mod mode;
mod structural;

pub use mode::MatchMode;
pub use structural::{contains, exact_equals, matches};
