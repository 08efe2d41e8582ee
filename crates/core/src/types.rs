//! Shared primitive types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// An entity identifier.
///
/// Identifiers arrive in two shapes: numeric sequence values assigned on the
/// client (`42`) and opaque strings assigned by the remote store
/// (`"a1b2c3"`). Both are normalized to their string form so that equality,
/// hashing, and lookups never depend on the JSON type the id happened to be
/// carried as. `EntityId::from(42) == EntityId::from("42")` holds by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        /// Accept either JSON shape an identifier can arrive in.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Str(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => EntityId::from(n),
            Raw::Str(s) => EntityId::from(s),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_ids_are_equivalent() {
        assert_eq!(EntityId::from(42), EntityId::from("42"));
        assert_eq!(EntityId::from("42"), EntityId::from(42i64));
    }

    #[test]
    fn test_distinct_ids_differ() {
        assert_ne!(EntityId::from(42), EntityId::from("043"));
        assert_ne!(EntityId::from("42"), EntityId::from("42 "));
    }

    #[test]
    fn test_deserialize_from_number_and_string() {
        let from_num: EntityId = serde_json::from_str("42").unwrap();
        let from_str: EntityId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_num, from_str);
    }

    #[test]
    fn test_serializes_as_string() {
        let id = EntityId::from(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"7\"");
    }
}
