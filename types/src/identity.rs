//! Participant identity.
//!
//! Identities are opaque strings handed to the engine by whatever
//! authentication layer sits in front of it. The engine never inspects
//! them beyond equality and display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque participant identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Create a new identity from a raw string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_raw_string() {
        let id = ParticipantId::new("alice");
        assert_eq!(id.to_string(), "alice");
        assert_eq!(id.as_str(), "alice");
    }

    #[test]
    fn test_equality_is_by_content() {
        assert_eq!(ParticipantId::from("bob"), ParticipantId::new("bob"));
        assert_ne!(ParticipantId::new("bob"), ParticipantId::new("carol"));
    }
}
