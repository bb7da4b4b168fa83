use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An assistant reply as delivered by the backend: the text to display plus
/// zero or more follow-up suggestions offered as clickable shortcuts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Reply body in the widget's markup subset.
    #[serde(rename = "reply")]
    pub text: String,
    /// Follow-up query strings, in the order they should be offered.
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl Reply {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestions(text: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self {
            text: text.into(),
            suggestions,
        }
    }
}

/// Identity of a mount point, used to key in-flight reveal animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MountId(Uuid);

impl MountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_deserializes_backend_payload() {
        let reply: Reply = serde_json::from_str(
            r#"{"reply":"Hello!","suggestions":["Working hours?","Contact HR"]}"#,
        )
        .unwrap();
        assert_eq!(reply.text, "Hello!");
        assert_eq!(reply.suggestions, vec!["Working hours?", "Contact HR"]);
    }

    #[test]
    fn suggestions_default_to_empty() {
        let reply: Reply = serde_json::from_str(r#"{"reply":"Hi"}"#).unwrap();
        assert!(reply.suggestions.is_empty());
    }

    #[test]
    fn mount_ids_are_unique() {
        assert_ne!(MountId::new(), MountId::new());
    }
}
