//! Null-tolerant field decoding
//!
//! The judge sends `null` for unset columns. `#[serde(default)]` only covers
//! missing keys, so fields that fall back to their default also route
//! through [`null_as_default`].

use serde::{Deserialize, Deserializer};

/// Decode `T`, treating an explicit `null` like a missing key
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "null_as_default")]
        count: u32,
        #[serde(default, deserialize_with = "null_as_default")]
        names: Vec<String>,
    }

    #[test]
    fn test_null_and_missing_fall_back() {
        let row: Row = serde_json::from_value(json!({"count": null, "names": null})).unwrap();
        assert_eq!(row.count, 0);
        assert!(row.names.is_empty());

        let row: Row = serde_json::from_value(json!({})).unwrap();
        assert_eq!(row.count, 0);

        let row: Row = serde_json::from_value(json!({"count": 4, "names": ["a"]})).unwrap();
        assert_eq!(row.count, 4);
        assert_eq!(row.names, vec!["a".to_string()]);
    }

    #[test]
    fn test_wrong_type_still_fails() {
        assert!(serde_json::from_value::<Row>(json!({"count": "four"})).is_err());
    }
}
