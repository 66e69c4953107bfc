//! Identifier model

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{AppError, AppResult};

/// Opaque identifier handed out by the judge service.
///
/// The service speaks numeric ids, but the client treats them as text and
/// accepts either a JSON string or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric form, as required in request bodies
    pub fn as_number(&self) -> AppResult<i64> {
        self.0
            .parse()
            .map_err(|_| AppError::InvalidInput(format!("Identifier '{}' is not numeric", self.0)))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Int(i64),
            Text(String),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Int(id) => Self::from(id),
            Wire::Text(id) => Self::new(id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_number_or_string() {
        let from_number: EntityId = serde_json::from_str("42").unwrap();
        let from_text: EntityId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(from_number.as_number().unwrap(), 42);
    }

    #[test]
    fn test_non_numeric_id_is_rejected_for_requests() {
        let id = EntityId::from("abc");
        assert!(matches!(id.as_number(), Err(AppError::InvalidInput(_))));
    }
}
