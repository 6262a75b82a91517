//! Match mode selecting how an expected value is compared to the tail message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a mock's expected value is compared against the last message of a request.
///
/// Fixed when the mock is registered and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Structural identity of the two value trees
    Exact,
    /// One-sided structural containment (see [`super::matches`])
    Contains,
}

impl MatchMode {
    /// Get mode name as it appears in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Exact => "exact",
            MatchMode::Contains => "contains",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_mode_serde_names() {
        let exact: MatchMode = serde_json::from_str(r#""exact""#).unwrap();
        let contains: MatchMode = serde_json::from_str(r#""contains""#).unwrap();
        assert_eq!(exact, MatchMode::Exact);
        assert_eq!(contains, MatchMode::Contains);
        assert_eq!(
            serde_json::to_string(&MatchMode::Contains).unwrap(),
            r#""contains""#
        );
    }

    #[test]
    fn test_match_mode_rejects_unknown() {
        assert!(serde_json::from_str::<MatchMode>(r#""regex""#).is_err());
        assert!(serde_json::from_str::<MatchMode>(r#""Exact""#).is_err());
    }

    #[test]
    fn test_match_mode_display() {
        assert_eq!(MatchMode::Exact.to_string(), "exact");
        assert_eq!(MatchMode::Contains.to_string(), "contains");
    }
}
