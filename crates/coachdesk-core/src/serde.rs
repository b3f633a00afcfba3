//! Custom serde helpers for query-string deserialization.
//!
//! Browsers send empty query parameters as empty strings; these helpers map
//! `""` to `None` instead of a parse failure.

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

pub fn deserialize_optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

pub fn deserialize_optional_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => Uuid::parse_str(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Params {
        #[serde(default, deserialize_with = "deserialize_optional_bool")]
        is_active: Option<bool>,
        #[serde(default, deserialize_with = "deserialize_optional_uuid")]
        id: Option<Uuid>,
    }

    #[test]
    fn test_empty_strings_become_none() {
        let params: Params = serde_json::from_str(r#"{"is_active":"","id":""}"#).unwrap();
        assert_eq!(params.is_active, None);
        assert_eq!(params.id, None);
    }

    #[test]
    fn test_values_parse() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"is_active":"true","id":"{}"}}"#, id);
        let params: Params = serde_json::from_str(&json).unwrap();
        assert_eq!(params.is_active, Some(true));
        assert_eq!(params.id, Some(id));
    }

    #[test]
    fn test_invalid_values_error() {
        assert!(serde_json::from_str::<Params>(r#"{"is_active":"maybe"}"#).is_err());
        assert!(serde_json::from_str::<Params>(r#"{"id":"not-a-uuid"}"#).is_err());
    }
}
