//! Newtype IDs for type-safe catalog references.
//!
//! Menu item IDs come from the upstream menu service. Some backends emit them
//! as JSON strings, others as integers, so deserialization accepts both and
//! normalizes to a string.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Stable identifier of a menu item in the restaurant catalog.
///
/// Cart line items are keyed by this ID, so two menu cards with the same ID
/// always land on the same line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MenuItemId(String);

impl MenuItemId {
    /// Create a new ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MenuItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MenuItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for MenuItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<MenuItemId> for String {
    fn from(id: MenuItemId) -> Self {
        id.0
    }
}

impl<'de> Deserialize<'de> for MenuItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Unsigned(n) => Self(n.to_string()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_string_id() {
        let id: MenuItemId = serde_json::from_str("\"margherita\"").unwrap();
        assert_eq!(id.as_str(), "margherita");
    }

    #[test]
    fn test_deserialize_numeric_id() {
        let id: MenuItemId = serde_json::from_str("42").unwrap();
        assert_eq!(id, MenuItemId::new("42"));
    }

    #[test]
    fn test_display_matches_inner() {
        assert_eq!(MenuItemId::from("7").to_string(), "7");
    }
}
